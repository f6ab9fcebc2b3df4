#[cfg(test)]
mod tests {
    use crate::error::{ERR_IO, ERR_NAMING_CONVENTION};
    use crate::runner::{collect_files, run, FileStatus, RunnerConfig};
    use std::fs;
    use std::path::{Path, PathBuf};

    const GOOD: &str = "import { Add16 } from '@carbon/icons-react';\nconst el = <Add16 />;\n";
    const BAD: &str = "import { Add } from '@carbon/icons-react';\nconst el = <Add />;\n";
    const PLAIN: &str = "export const answer = 42;\n";

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_failure_in_one_file_does_not_stop_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let good = write(dir.path(), "a/good.jsx", GOOD);
        let bad = write(dir.path(), "b/bad.js", BAD);
        let plain = write(dir.path(), "c/plain.ts", PLAIN);

        let summary = run(&[dir.path().to_path_buf()], &RunnerConfig::default(), false);
        assert_eq!(summary.changed, 1);
        assert_eq!(summary.unchanged, 1);
        assert_eq!(summary.failed, 1);
        assert!(summary.has_failures());

        assert_eq!(
            fs::read_to_string(&good).unwrap(),
            "import { Add } from '@carbon/icons-react/next';\nconst el = <Add size={16} />;\n"
        );
        assert_eq!(fs::read_to_string(&bad).unwrap(), BAD);
        assert_eq!(fs::read_to_string(&plain).unwrap(), PLAIN);

        let failed = summary
            .files
            .iter()
            .find(|f| f.status == FileStatus::Failed)
            .unwrap();
        assert_eq!(failed.path, bad);
        assert_eq!(failed.error_code.as_deref(), Some(ERR_NAMING_CONVENTION));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let good = write(dir.path(), "good.tsx", GOOD);
        let config = RunnerConfig {
            dry_run: true,
            ..RunnerConfig::default()
        };

        let summary = run(&[good.clone()], &config, true);
        assert_eq!(summary.changed, 1);
        assert_eq!(fs::read_to_string(&good).unwrap(), GOOD);
        let output = summary.files[0].output.as_deref().unwrap();
        assert!(output.contains("<Add size={16} />"));
    }

    #[test]
    fn test_collect_files_filters_extensions_and_ignores() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "src/a.js", PLAIN);
        write(dir.path(), "src/b.css", "body {}");
        write(dir.path(), "node_modules/pkg/index.js", PLAIN);
        write(dir.path(), "src/nested/c.tsx", PLAIN);

        let files = collect_files(&[dir.path().to_path_buf()], &RunnerConfig::default());
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.js", "c.tsx"]);

        let config = RunnerConfig {
            extensions: vec!["css".to_string()],
            ..RunnerConfig::default()
        };
        assert_eq!(collect_files(&[dir.path().to_path_buf()], &config).len(), 1);
    }

    #[test]
    fn test_missing_root_is_reported_as_failure() {
        let dir = tempfile::tempdir().unwrap();
        let good = write(dir.path(), "good.jsx", GOOD);
        let missing = dir.path().join("does-not-exist.js");

        let summary = run(&[missing.clone(), good], &RunnerConfig::default(), false);
        assert_eq!(summary.changed, 1);
        assert_eq!(summary.failed, 1);
        assert!(summary.has_failures());

        let failed = summary
            .files
            .iter()
            .find(|f| f.status == FileStatus::Failed)
            .unwrap();
        assert_eq!(failed.path, missing);
        assert_eq!(failed.error_code.as_deref(), Some(ERR_IO));
        assert!(collect_files(&[missing], &RunnerConfig::default()).is_empty());
    }

    #[test]
    fn test_summary_serializes() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "good.jsx", GOOD);
        let summary = run(&[dir.path().to_path_buf()], &RunnerConfig::default(), false);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["changed"], 1);
        assert_eq!(json["files"][0]["status"], "changed");
        assert_eq!(json["files"][0]["bindings"][0]["replacement"], "Add");
        assert_eq!(json["files"][0]["bindings"][0]["size"], 16);
    }
}
