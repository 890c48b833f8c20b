use std::path::{Path, PathBuf};

use crate::api::OverpassClient;
use crate::domain::{AdminLevel, BoundaryQuery, DEFAULT_SERVER_TIMEOUT_SECS, QueryStyle};
use crate::error::Result;
use crate::osm::write_raw;

/// A level whose payload made it to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedLevel {
    pub level: AdminLevel,
    pub path: PathBuf,
    pub bytes: usize,
}

/// Progress notifications from [`Fetcher::fetch_levels`]
#[derive(Debug)]
pub enum FetchEvent<'a> {
    /// About to send the request for this level
    Started(AdminLevel),
    /// The level's file has been written and flushed
    Saved(&'a SavedLevel),
}

/// Downloads boundary relations level by level into `output_dir`
pub struct Fetcher {
    client: OverpassClient,
    output_dir: PathBuf,
    style: QueryStyle,
    server_timeout_secs: u32,
}

impl Fetcher {
    pub fn new(client: OverpassClient, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            output_dir: output_dir.into(),
            style: QueryStyle::default(),
            server_timeout_secs: DEFAULT_SERVER_TIMEOUT_SECS,
        }
    }

    pub fn with_style(mut self, style: QueryStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_server_timeout(mut self, secs: u32) -> Self {
        self.server_timeout_secs = secs;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn query_for(&self, level: AdminLevel) -> BoundaryQuery {
        BoundaryQuery::new(level)
            .with_style(self.style)
            .with_server_timeout(self.server_timeout_secs)
    }

    pub fn output_path(&self, level: AdminLevel) -> PathBuf {
        self.output_dir.join(level.file_name())
    }

    /// Fetch one level and write it to `al{level}.geom.osm`
    ///
    /// The file is only touched once the whole response body is in memory, so
    /// a failed request leaves any previous file for that level as it was.
    pub fn fetch_level(&self, level: AdminLevel) -> Result<SavedLevel> {
        let query = self.query_for(level).render();
        let body = self.client.interpret(&query)?;

        let path = self.output_path(level);
        write_raw(&path, &body)?;
        tracing::debug!(%level, path = %path.display(), bytes = body.len(), "saved level");

        Ok(SavedLevel {
            level,
            path,
            bytes: body.len(),
        })
    }

    /// Fetch each level in order, one request at a time
    ///
    /// Stops at the first failure; levels after it are never requested.
    pub fn fetch_levels<F>(&self, levels: &[AdminLevel], mut on_event: F) -> Result<Vec<SavedLevel>>
    where
        F: FnMut(FetchEvent<'_>),
    {
        let mut saved = Vec::with_capacity(levels.len());

        for &level in levels {
            on_event(FetchEvent::Started(level));
            let result = self.fetch_level(level)?;
            on_event(FetchEvent::Saved(&result));
            saved.push(result);
        }

        Ok(saved)
    }
}
