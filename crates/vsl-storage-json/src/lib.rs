//! vsl-storage-json
//!
//! Filesystem-backed JSON persistence: a lead sink that keeps captured leads
//! in a single JSON array, and loaders for form schema documents.

use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::Utc;
use thiserror::Error;
use vsl_core::{LeadSink, SinkError};
use vsl_domain::{FormSchema, Lead, LeadInput};

const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Lead sink writing every lead into one JSON array file.
///
/// Writes go through a temporary file and a rename so a crash never leaves a
/// half-written store behind.
#[derive(Debug)]
pub struct JsonLeadSink {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonLeadSink {
    pub fn new(path: PathBuf) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn leads(&self) -> Result<Vec<Lead>, StorageError> {
        read_leads(&self.path)
    }

    /// Stores `input` as a new lead. Missing contact fields are kept as
    /// `null`.
    pub fn append(&self, input: &LeadInput) -> Result<Lead, StorageError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "lead store lock poisoned"))?;
        let mut leads = read_leads(&self.path)?;
        let lead = Lead::new(input.clone(), Utc::now());
        leads.push(lead.clone());
        let json = serde_json::to_string_pretty(&leads)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::info!(lead_id = %lead.id, path = %self.path.display(), "lead stored");
        Ok(lead)
    }
}

impl LeadSink for JsonLeadSink {
    fn submit_lead(&self, input: &LeadInput) -> Result<Lead, SinkError> {
        self.append(input)
            .map_err(|err| SinkError::Unavailable(err.to_string()))
    }
}

/// Reads a form schema document. Schema rules are enforced while parsing.
pub fn load_schema(path: &Path) -> Result<FormSchema, StorageError> {
    let data = fs::read_to_string(path)?;
    let schema = serde_json::from_str(&data)?;
    tracing::debug!(path = %path.display(), "form schema loaded");
    Ok(schema)
}

pub fn save_schema(schema: &FormSchema, path: &Path) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(schema)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn read_leads(path: &Path) -> Result<Vec<Lead>, StorageError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = fs::read_to_string(path)?;
    if data.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&data)?)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
