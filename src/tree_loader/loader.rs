use crate::decision_engine::DecisionTree;
use crate::tree_loader::factory::{TreeFactoryError, from_json};
use futures::stream::FuturesUnordered;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::task::JoinError;
use tokio::{fs, task};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReadDirStream;
use tracing::{info, instrument, warn};

/// Loads every tree in `directory` whose file has the given extension.
///
/// Files which cannot be read or do not contain a valid tree are logged and skipped.
#[instrument]
pub async fn load_trees_from(directory: &str, extension: &str) -> Result<Vec<DecisionTree>, LoaderError> {
    info!("📁 Loading protocols...");
    let files = list_files(directory, extension)
        .await
        .map_err(|e| LoaderError::Io { source: e, path: None })?;

    let results = load_files(files).await;
    let (trees, errors): (Vec<_>, Vec<_>) = results.into_iter().partition(Result::is_ok);

    for error in errors.iter().filter_map(|res| res.as_ref().err()) {
        log_error(error);
    }

    info!("📁 Loading protocols... OK, {} loaded, {} failed", trees.len(), errors.len());
    let mut trees = trees.into_iter().filter_map(Result::ok).collect::<Vec<_>>();
    // Files complete in any order, sort to keep the registry deterministic
    trees.sort_by(|a, b| (a.name(), a.locale()).cmp(&(b.name(), b.locale())));
    Ok(trees)
}

#[instrument]
async fn list_files(directory: &str, extension: &str) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let dir = fs::read_dir(directory).await?;
    let mut entries = ReadDirStream::new(dir);

    while let Some(entry) = entries.next().await {
        match entry {
            Ok(entry) => {
                let path = entry.path();
                if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(extension) {
                    files.push(path);
                }
            }
            Err(err) => warn!("⚠️ Unable to read directory entry: {}", err),
        }
    }

    Ok(files)
}

#[instrument(skip_all)]
async fn load_files(paths: Vec<PathBuf>) -> Vec<Result<DecisionTree, LoaderError>> {
    FuturesUnordered::from_iter(paths.into_iter().map(|path| async move {
        match fs::read_to_string(&path).await {
            Ok(content) => task::spawn_blocking(move || from_json(&content).map_err(|e| LoaderError::TreeFactory { source: e, path })).await?,
            Err(err) => Err(LoaderError::Io {
                source: err,
                path: Some(path),
            }),
        }
    }))
    .collect()
    .await
}

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|s| s.to_str()).unwrap_or("unknown")
}

fn log_error(error: &LoaderError) {
    match error {
        LoaderError::TreeFactory { source, path } => warn!("⚠️ Failed to load '{}': {}", file_name(path), source),
        LoaderError::Io { source, path } => match path {
            Some(path) => warn!("⚠️ Failed to load '{}': {}", file_name(path), source),
            None => warn!("⚠️ {}", source),
        },
        LoaderError::JoinError(err) => warn!("⚠️ {}", err),
    }
}

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("{}", source)]
    TreeFactory { source: TreeFactoryError, path: PathBuf },
    #[error("{}", source)]
    Io { source: io::Error, path: Option<PathBuf> },
    #[error(transparent)]
    JoinError(#[from] JoinError),
}
