//! Apply command implementation
//!
//! Runs an edit plan against its target and writes the result once.

use serde_json::json;
use std::path::Path;

use super::output::{OutputMode, commit};
use crate::error::Result;
use crate::plan::EditPlan;

/// Run the apply command
pub fn run_apply(plan_path: &Path, mode: OutputMode) -> Result<()> {
    let plan = EditPlan::load(plan_path)?;
    let document = splice_fs::read_document(&plan.target)?;

    let run = plan.run(&document)?;
    let details = json!({
        "plan": plan_path.display().to_string(),
        "steps": run.outcomes,
    });

    commit(&plan.target, &document, &run.document, mode, details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::PAGE;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const PLAN: &str = r#"
target = "src/page.tsx"

[[steps]]
kind = "insert_after"
anchor = { literal = "setShowMenu" }
lines = ["    const [open, setOpen] = useState(false)"]
skip_if_present = true

[[steps]]
kind = "replace_block"
anchor = { literal = "className=\"sidebar\"" }
open = "<div"
close = "</div>"
payload = "sidebar_new.txt"
"#;

    fn setup(plan: &str) -> (TempDir, std::path::PathBuf) {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("src/page.tsx"), PAGE).unwrap();
        fs::write(temp.path().join("sidebar_new.txt"), "        <aside />\r\n").unwrap();
        let plan_path = temp.path().join("plan.toml");
        fs::write(&plan_path, plan).unwrap();
        (temp, plan_path)
    }

    #[test]
    fn apply_runs_all_steps() {
        let (temp, plan_path) = setup(PLAN);

        // `<aside />` has no div markers, so it is balanced
        run_apply(&plan_path, OutputMode::default()).unwrap();

        let content = fs::read_to_string(temp.path().join("src/page.tsx")).unwrap();
        assert_eq!(
            content,
            "export default function Page() {\r\n    const [showMenu, setShowMenu] = useState(false)\r\n    const [open, setOpen] = useState(false)\r\n    return (\r\n        <aside />\r\n    )\r\n}\r\n"
        );
    }

    #[test]
    fn second_apply_fails_without_writing() {
        let (temp, plan_path) = setup(PLAN);
        run_apply(&plan_path, OutputMode::default()).unwrap();

        // The sidebar anchor no longer exists, so the second run fails
        // before anything is written.
        let before = fs::read_to_string(temp.path().join("src/page.tsx")).unwrap();
        let err = run_apply(&plan_path, OutputMode::default()).unwrap_err();
        assert_eq!(err.code(), "ambiguous_anchor");
        assert!(err.to_string().starts_with("step 2:"));
        assert_eq!(
            fs::read_to_string(temp.path().join("src/page.tsx")).unwrap(),
            before
        );
    }

    #[test]
    fn apply_dry_run_leaves_target_untouched() {
        let (temp, plan_path) = setup(PLAN);
        let mode = OutputMode {
            dry_run: true,
            json: true,
        };

        run_apply(&plan_path, mode).unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join("src/page.tsx")).unwrap(),
            PAGE
        );
    }
}
