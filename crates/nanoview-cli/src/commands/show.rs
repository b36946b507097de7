//! Show command implementation.

use crate::cli::ShowArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use nanoview_labels::StaticResolver;
use nanoview_viewer::{NanopubViewer, ViewRequest, ViewResult};
use std::fs;
use tracing::debug;

/// Execute the show command.
pub async fn execute_show(args: ShowArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let with_graphs = args.graphs;
    let result = view(args, config).await?;
    println!("{}", formatter.format_view(&result, with_graphs)?);
    Ok(())
}

/// Read the files named by `args` and build the view.
pub async fn view(args: ShowArgs, config: &Config) -> Result<ViewResult> {
    let document = fs::read_to_string(&args.document)?;
    let mut request = ViewRequest::new(document);
    if let Some(path) = &args.template {
        request = request.with_template(fs::read_to_string(path)?);
    }

    let resolver = match &args.labels {
        Some(path) => StaticResolver::from_toml(&fs::read_to_string(path)?)?,
        None => StaticResolver::new(),
    };
    debug!(known_labels = resolver.len(), "label file loaded");

    let mut viewer_config = config.viewer.clone();
    if args.strict {
        viewer_config.require_assertion = true;
    }

    let viewer = NanopubViewer::new(resolver, viewer_config)?;
    Ok(viewer.view(request).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use nanoview_viewer::ViewerError;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    const DOCUMENT: &str = r#"@prefix this: <https://w3id.org/np/RAabc> .
@prefix sub: <https://w3id.org/np/RAabc/> .
@prefix ex: <http://example.org/> .

sub:assertion {
  <https://doi.org/10.1234/paper> ex:topic <http://www.wikidata.org/entity/Q42> .
}
"#;

    fn write_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn args(document: PathBuf) -> ShowArgs {
        ShowArgs {
            document,
            template: None,
            labels: None,
            graphs: false,
            strict: false,
        }
    }

    #[tokio::test]
    async fn test_view_with_label_file() {
        let document = write_file(DOCUMENT);
        let labels = write_file("\"http://www.wikidata.org/entity/Q42\" = \"Douglas Adams\"\n");

        let mut show = args(document.path().to_path_buf());
        show.labels = Some(labels.path().to_path_buf());

        let result = view(show, &Config::default()).await.unwrap();
        assert!(result.fields.is_empty());
        assert_eq!(result.unmatched.len(), 1);
        assert_eq!(result.unmatched[0].values[0].display.as_str(), "Douglas Adams");
    }

    #[tokio::test]
    async fn test_strict_flag_requires_assertion() {
        let document = write_file("@prefix sub: <https://w3id.org/np/RAabc/> .\n");

        let lenient = view(args(document.path().to_path_buf()), &Config::default()).await;
        assert!(lenient.is_ok());

        let mut strict = args(document.path().to_path_buf());
        strict.strict = true;
        let err = view(strict, &Config::default()).await.unwrap_err();
        assert!(matches!(err, CliError::Viewer(ViewerError::MissingGraph(_))));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = view(args(PathBuf::from("/nonexistent/np.trig")), &Config::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }
}
