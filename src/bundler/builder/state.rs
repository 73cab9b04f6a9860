//! Build state machine.
//!
//! ```text
//! Uninitialized → Validated → Cleaned → ResourcesCompiled → Linked → Compiled
//!   → Archived → Dexed → Merged → AssetsInjected → Aligned → Signed
//!
//! any stage failure → Aborted
//! ```
//!
//! `Signed` and `Aborted` are terminal.

use std::fmt;

/// Where a build currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildState {
    Uninitialized,
    /// Tools and library manifest checked; nothing written yet.
    Validated,
    Cleaned,
    ResourcesCompiled,
    Linked,
    Compiled,
    Archived,
    Dexed,
    Merged,
    AssetsInjected,
    Aligned,
    /// Final APK written. Terminal.
    Signed,
    /// A stage failed; the build directory is left as is. Terminal.
    Aborted,
}

impl BuildState {
    /// Stage that moves the build out of this state, if any.
    pub fn next_stage(self) -> Option<Stage> {
        match self {
            BuildState::Validated => Some(Stage::Clean),
            BuildState::Cleaned => Some(Stage::CompileResources),
            BuildState::ResourcesCompiled => Some(Stage::LinkResources),
            BuildState::Linked => Some(Stage::CompileSources),
            BuildState::Compiled => Some(Stage::ArchiveClasses),
            BuildState::Archived => Some(Stage::GenerateDex),
            BuildState::Dexed => Some(Stage::MergeDex),
            BuildState::Merged => Some(Stage::InjectAssets),
            BuildState::AssetsInjected => Some(Stage::Align),
            BuildState::Aligned => Some(Stage::Sign),
            BuildState::Uninitialized | BuildState::Signed | BuildState::Aborted => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BuildState::Uninitialized => "uninitialized",
            BuildState::Validated => "validated",
            BuildState::Cleaned => "cleaned",
            BuildState::ResourcesCompiled => "resources-compiled",
            BuildState::Linked => "linked",
            BuildState::Compiled => "compiled",
            BuildState::Archived => "archived",
            BuildState::Dexed => "dexed",
            BuildState::Merged => "merged",
            BuildState::AssetsInjected => "assets-injected",
            BuildState::Aligned => "aligned",
            BuildState::Signed => "signed",
            BuildState::Aborted => "aborted",
        }
    }
}

impl fmt::Display for BuildState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of the pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Clean,
    CompileResources,
    LinkResources,
    CompileSources,
    ArchiveClasses,
    GenerateDex,
    MergeDex,
    InjectAssets,
    Align,
    Sign,
}

impl Stage {
    pub const ALL: [Stage; 10] = [
        Stage::Clean,
        Stage::CompileResources,
        Stage::LinkResources,
        Stage::CompileSources,
        Stage::ArchiveClasses,
        Stage::GenerateDex,
        Stage::MergeDex,
        Stage::InjectAssets,
        Stage::Align,
        Stage::Sign,
    ];

    /// 1-based position in [`Stage::ALL`].
    pub fn number(self) -> usize {
        self as usize + 1
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::Clean => "clean build directory",
            Stage::CompileResources => "compile resources (aapt2 compile)",
            Stage::LinkResources => "link manifest and resources (aapt2 link)",
            Stage::CompileSources => "compile java sources (javac)",
            Stage::ArchiveClasses => "archive classes (classes.jar)",
            Stage::GenerateDex => "generate dex (d8)",
            Stage::MergeDex => "merge dex into package",
            Stage::InjectAssets => "inject assets",
            Stage::Align => "align package (zipalign)",
            Stage::Sign => "sign package (apksigner)",
        }
    }

    /// State reached when this stage succeeds.
    pub fn completes(self) -> BuildState {
        match self {
            Stage::Clean => BuildState::Cleaned,
            Stage::CompileResources => BuildState::ResourcesCompiled,
            Stage::LinkResources => BuildState::Linked,
            Stage::CompileSources => BuildState::Compiled,
            Stage::ArchiveClasses => BuildState::Archived,
            Stage::GenerateDex => BuildState::Dexed,
            Stage::MergeDex => BuildState::Merged,
            Stage::InjectAssets => BuildState::AssetsInjected,
            Stage::Align => BuildState::Aligned,
            Stage::Sign => BuildState::Signed,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_chain_from_validated_to_signed() {
        let mut state = BuildState::Validated;
        let mut visited = Vec::new();
        while let Some(stage) = state.next_stage() {
            visited.push(stage);
            state = stage.completes();
        }
        assert_eq!(state, BuildState::Signed);
        assert_eq!(visited, Stage::ALL);
    }

    #[test]
    fn assets_are_injected_before_alignment() {
        let pos = |s: Stage| Stage::ALL.iter().position(|x| *x == s).unwrap();
        assert!(pos(Stage::InjectAssets) < pos(Stage::Align));
        assert!(pos(Stage::MergeDex) < pos(Stage::Align));
        assert_eq!(Stage::Sign.number(), Stage::ALL.len());
    }

    #[test]
    fn terminal_states_have_no_next_stage() {
        for state in [BuildState::Signed, BuildState::Aborted] {
            assert_eq!(state.next_stage(), None);
        }
        assert_eq!(BuildState::Aligned.next_stage(), Some(Stage::Sign));
    }
}
