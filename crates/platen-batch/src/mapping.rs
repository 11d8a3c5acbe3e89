// this_file: crates/platen-batch/src/mapping.rs

//! Where the region-to-column mapping comes from.
//!
//! The batch never asks a person anything itself. A [`ChannelMapping`]
//! hands the question to whoever holds the receiving end (the CLI prompt,
//! a GUI, a test) and blocks until it answers or goes away.

use std::fs;
use std::sync::mpsc::{self, Receiver, Sender, SyncSender};

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::BatchError;
use crate::types::{RegionMapping, RegionSummary};

/// Anything that can decide which column feeds which region.
pub trait MappingProvider {
    /// Produces a mapping for these regions and columns.
    ///
    /// An empty mapping is a valid answer; the caller decides whether it
    /// can proceed.
    fn mapping(
        &self,
        regions: &[RegionSummary],
        columns: &[String],
    ) -> Result<RegionMapping, BatchError>;
}

impl MappingProvider for RegionMapping {
    fn mapping(&self, _: &[RegionSummary], _: &[String]) -> Result<RegionMapping, BatchError> {
        Ok(self.clone())
    }
}

/// A mapping saved as JSON.
#[derive(Debug, Clone)]
pub struct FileMapping {
    path: Utf8PathBuf,
}

impl FileMapping {
    /// Mapping file at `path`
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Mapping file location
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl MappingProvider for FileMapping {
    fn mapping(&self, _: &[RegionSummary], _: &[String]) -> Result<RegionMapping, BatchError> {
        let error = |reason: String| BatchError::Mapping {
            path: self.path.to_string(),
            reason,
        };
        let text = fs::read_to_string(&self.path).map_err(|e| error(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| error(e.to_string()))
    }
}

/// A question put to an outside collaborator.
#[derive(Debug)]
pub struct MappingRequest {
    /// Regions in the template
    pub regions: Vec<RegionSummary>,
    /// Columns in the data source
    pub columns: Vec<String>,
    reply: SyncSender<RegionMapping>,
}

impl MappingRequest {
    /// Sends the answer back. Returns false if the batch stopped waiting.
    pub fn respond(self, mapping: RegionMapping) -> bool {
        self.reply.send(mapping).is_ok()
    }

    /// Declines to answer; the batch sees an empty mapping.
    pub fn cancel(self) {}
}

/// Asks for the mapping over a channel.
#[derive(Debug, Clone)]
pub struct ChannelMapping {
    requests: Sender<MappingRequest>,
}

impl ChannelMapping {
    /// Provider sending its questions to `requests`
    pub fn new(requests: Sender<MappingRequest>) -> Self {
        Self { requests }
    }

    /// A provider and the receiver its questions arrive on
    pub fn channel() -> (Self, Receiver<MappingRequest>) {
        let (tx, rx) = mpsc::channel();
        (Self::new(tx), rx)
    }
}

impl MappingProvider for ChannelMapping {
    fn mapping(
        &self,
        regions: &[RegionSummary],
        columns: &[String],
    ) -> Result<RegionMapping, BatchError> {
        let (reply, answer) = mpsc::sync_channel(1);
        let request = MappingRequest {
            regions: regions.to_vec(),
            columns: columns.to_vec(),
            reply,
        };

        if self.requests.send(request).is_err() {
            log::warn!("Nobody is listening for mapping requests");
            return Ok(RegionMapping::default());
        }

        match answer.recv() {
            Ok(mapping) => Ok(mapping),
            Err(_) => {
                log::info!("Mapping request was cancelled");
                Ok(RegionMapping::default())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RegionKind;
    use platen_core::types::Bounds;
    use std::thread;

    fn regions() -> Vec<RegionSummary> {
        vec![RegionSummary {
            name: "title".into(),
            kind: RegionKind::Text,
            bounds: Bounds::new(0, 0, 100, 20),
            font_name: None,
        }]
    }

    #[test]
    fn test_channel_round_trip() {
        let (provider, requests) = ChannelMapping::channel();
        let responder = thread::spawn(move || {
            let request = requests.recv().unwrap();
            assert_eq!(request.regions[0].name, "title");
            assert_eq!(request.columns, ["Name"]);
            let mut mapping = RegionMapping::default();
            mapping.text.insert("title".into(), "Name".into());
            assert!(request.respond(mapping));
        });

        let mapping = provider.mapping(&regions(), &["Name".to_string()]).unwrap();
        responder.join().unwrap();
        assert_eq!(mapping.text["title"], "Name");
    }

    #[test]
    fn test_cancel_yields_empty_mapping() {
        let (provider, requests) = ChannelMapping::channel();
        let responder = thread::spawn(move || requests.recv().unwrap().cancel());

        let mapping = provider.mapping(&regions(), &[]).unwrap();
        responder.join().unwrap();
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_no_listener_yields_empty_mapping() {
        let (provider, requests) = ChannelMapping::channel();
        drop(requests);
        assert!(provider.mapping(&regions(), &[]).unwrap().is_empty());
    }

    #[test]
    fn test_file_mapping_errors() {
        let provider = FileMapping::new("/definitely/missing/mapping.json");
        assert!(matches!(
            provider.mapping(&regions(), &[]),
            Err(BatchError::Mapping { .. })
        ));
    }
}
