//! Reading calculation requests.
//!
//! A request comes from a JSON document (file or stdin), from `--item`
//! flags, or both. Items given as flags are appended after the document's.

use std::path::{Path, PathBuf};

use billsplit_core::{CalculateRequest, Item};
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::error::CliError;

/// Where the request document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// `-` means stdin, anything else is a path.
    pub fn from_arg(arg: &Path) -> Self {
        if arg == Path::new("-") {
            InputSource::Stdin
        } else {
            InputSource::File(arg.to_path_buf())
        }
    }

    fn name(&self) -> String {
        match self {
            InputSource::Stdin => "stdin".to_string(),
            InputSource::File(path) => path.display().to_string(),
        }
    }
}

/// Reads and decodes a request document.
pub async fn read_request(source: &InputSource) -> Result<CalculateRequest, CliError> {
    let read_err = |source_err| CliError::Read {
        source_name: source.name(),
        source: source_err,
    };

    let text = match source {
        InputSource::Stdin => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .map_err(read_err)?;
            text
        }
        InputSource::File(path) => tokio::fs::read_to_string(path).await.map_err(read_err)?,
    };

    debug!(source = %source.name(), bytes = text.len(), "Read request document");
    parse_request(&text)
}

/// Decodes a request document.
pub fn parse_request(text: &str) -> Result<CalculateRequest, CliError> {
    serde_json::from_str(text).map_err(CliError::Request)
}

/// Parses an item given as `NAME:RATE:QUANTITY:PERSON[,PERSON...]`.
///
/// The name may itself contain `:`; the last three fields are split off
/// from the right. People are comma-separated and trimmed by the core.
pub fn parse_item(spec: &str) -> Result<Item, CliError> {
    let invalid = |reason: &str| CliError::ItemSpec {
        spec: spec.to_string(),
        reason: reason.to_string(),
    };

    let mut fields = spec.rsplitn(4, ':');
    let (Some(people), Some(quantity), Some(rate), Some(name)) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(invalid("expected NAME:RATE:QUANTITY:PEOPLE"));
    };

    let rate = rate
        .trim()
        .parse::<f64>()
        .map_err(|_| invalid("rate is not a number"))?;
    let quantity = quantity
        .trim()
        .parse::<i64>()
        .map_err(|_| invalid("quantity is not a whole number"))?;
    let shared_by = if people.trim().is_empty() {
        Vec::new()
    } else {
        people.split(',').map(str::to_string).collect()
    };

    Ok(Item {
        name: name.trim().to_string(),
        rate,
        quantity,
        shared_by,
    })
}
