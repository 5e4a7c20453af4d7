use std::path::{Path, PathBuf};

/// Output path for one of `total` labelled results.
///
/// A single result goes to `template` itself; several results go to
/// `<stem>_<label>.<ext>` next to it.
pub fn labelled_path(template: &Path, label: &str, total: usize) -> PathBuf {
    if total <= 1 {
        return template.to_path_buf();
    }
    let stem = template
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match template.extension() {
        Some(ext) => format!("{}_{}.{}", stem, label, ext.to_string_lossy()),
        None => format!("{}_{}", stem, label),
    };
    template.with_file_name(file_name)
}

/// The four tables written for one base-pair step by the stiffness command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StiffnessPaths {
    pub covariance: PathBuf,
    pub stiffness: PathBuf,
    pub force_constants: PathBuf,
    pub averages: PathBuf,
}

impl StiffnessPaths {
    pub fn new(dir: &Path, label: &str) -> Self {
        Self {
            covariance: dir.join(format!("{label}_covariance.csv")),
            stiffness: dir.join(format!("{label}_stiffness.csv")),
            force_constants: dir.join(format!("{label}_fctes.csv")),
            averages: dir.join(format!("{label}_averages.csv")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_result_keeps_the_template() {
        let template = Path::new("out/corr.csv");
        assert_eq!(labelled_path(template, "CGCG", 1), template);
    }

    #[test]
    fn several_results_insert_the_label_before_the_extension() {
        assert_eq!(
            labelled_path(Path::new("out/corr.csv"), "CGCG", 3),
            PathBuf::from("out/corr_CGCG.csv")
        );
        assert_eq!(
            labelled_path(Path::new("hist"), "7", 2),
            PathBuf::from("hist_7")
        );
    }

    #[test]
    fn stiffness_paths_are_named_after_the_step() {
        let paths = StiffnessPaths::new(Path::new("results"), "AGCT");
        assert_eq!(paths.covariance, PathBuf::from("results/AGCT_covariance.csv"));
        assert_eq!(paths.stiffness, PathBuf::from("results/AGCT_stiffness.csv"));
        assert_eq!(paths.force_constants, PathBuf::from("results/AGCT_fctes.csv"));
        assert_eq!(paths.averages, PathBuf::from("results/AGCT_averages.csv"));
    }
}
