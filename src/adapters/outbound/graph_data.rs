use std::env;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::common::{DomainError, DomainResult};
use crate::domains::mapf::graph::{GraphDocument, Roadmap};
use crate::domains::mapf::ports::MapDataSource;

const MAGIC: &[u8; 4] = b"PGPH";
const FORMAT_VERSION: u8 = 1;

/// JSON header of a binary graph file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GraphHeader {
    format: String,
    version: u8,
}

/// Roadmaps stored under `<base>/graphs/`.
///
/// Names ending in `.json` hold a [`GraphDocument`]; every other name holds
/// the binary container `PGPH | version | header length (u32 LE) | JSON header
/// | bincode petgraph payload`. Version 0 files carry no header.
pub struct FilesystemDataSource {
    base: PathBuf,
}

impl FilesystemDataSource {
    /// Precedence: explicit base -> MAPF_DATA_DIR env var -> ./resources/mapf -> /usr/share/gryphon-mapf
    pub fn new(base: Option<PathBuf>) -> Self {
        let base = base.unwrap_or_else(|| {
            if let Ok(v) = env::var("MAPF_DATA_DIR") {
                PathBuf::from(v)
            } else {
                let cwd_default = Path::new("resources/mapf");
                if cwd_default.exists() { cwd_default.to_path_buf() } else { PathBuf::from("/usr/share/gryphon-mapf") }
            }
        });
        Self { base }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn graph_path(&self, name: &str) -> PathBuf {
        let mut p = self.base.clone();
        p.push("graphs");
        p.push(name);
        p
    }

    fn is_json(name: &str) -> bool {
        Path::new(name).extension().map_or(false, |ext| ext.eq_ignore_ascii_case("json"))
    }

    pub fn encode_binary(graph: &Roadmap) -> DomainResult<Vec<u8>> {
        let header = serde_json::to_vec(&GraphHeader {
            format: "petgraph-bincode".to_string(),
            version: FORMAT_VERSION,
        })?;
        let payload = bincode::serialize(graph).map_err(|e| DomainError::InfrastructureError(format!("{}", e)))?;
        let mut bytes = Vec::with_capacity(MAGIC.len() + 5 + header.len() + payload.len());
        bytes.extend_from_slice(MAGIC);
        bytes.push(FORMAT_VERSION);
        bytes.extend_from_slice(&(header.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&header);
        bytes.extend_from_slice(&payload);
        Ok(bytes)
    }

    pub fn decode_binary(bytes: &[u8]) -> DomainResult<Roadmap> {
        let invalid = |reason: &str| DomainError::InvalidGraph { reason: reason.to_string() };
        if bytes.len() < 9 || &bytes[..4] != MAGIC {
            return Err(invalid("missing PGPH magic"));
        }
        let version = bytes[4];
        if version > FORMAT_VERSION {
            return Err(DomainError::InvalidGraph {
                reason: format!("unsupported graph file version {}", version),
            });
        }
        let mut len_bytes = [0u8; 4];
        len_bytes.copy_from_slice(&bytes[5..9]);
        let header_len = u32::from_le_bytes(len_bytes) as usize;
        let payload_start = 9usize
            .checked_add(header_len)
            .filter(|&end| end <= bytes.len())
            .ok_or_else(|| invalid("truncated graph header"))?;
        if version >= 1 {
            let header: GraphHeader = serde_json::from_slice(&bytes[9..payload_start])?;
            if header.format != "petgraph-bincode" {
                return Err(DomainError::InvalidGraph {
                    reason: format!("unknown graph format {}", header.format),
                });
            }
        }
        bincode::deserialize(&bytes[payload_start..]).map_err(|e| DomainError::InfrastructureError(format!("{}", e)))
    }
}

impl MapDataSource for FilesystemDataSource {
    fn load_graph(&self, name: &str) -> DomainResult<Roadmap> {
        let p = self.graph_path(name);
        let mut buf = Vec::new();
        let mut f = fs::File::open(&p).map_err(|e| DomainError::InfrastructureError(format!("{}: {}", p.display(), e)))?;
        f.read_to_end(&mut buf).map_err(|e| DomainError::InfrastructureError(format!("{}", e)))?;
        if Self::is_json(name) {
            let document: GraphDocument = serde_json::from_slice(&buf)?;
            Roadmap::from_document(&document)
        } else {
            Self::decode_binary(&buf)
        }
    }

    fn save_graph(&self, name: &str, graph: &Roadmap) -> DomainResult<()> {
        let p = self.graph_path(name);
        if let Some(dir) = p.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir).map_err(|e| DomainError::InfrastructureError(format!("{}", e)))?;
            }
        }
        let bytes = if Self::is_json(name) {
            serde_json::to_vec_pretty(&graph.to_document())?
        } else {
            Self::encode_binary(graph)?
        };
        let mut f = fs::File::create(&p).map_err(|e| DomainError::InfrastructureError(format!("{}", e)))?;
        f.write_all(&bytes).map_err(|e| DomainError::InfrastructureError(format!("{}", e)))?;
        Ok(())
    }
}
