// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Loading of [Graphs](Graph) from tabular (CSV) node and edge files.
//!
//! The node file needs `name`, `lat` and `lon` columns, and the edge file needs
//! `from`, `to` and `cost` columns. Other columns are ignored. The Chinese column
//! names (`城市名`, `纬度`, `经度` and `起点`, `终点`, `距离`) are accepted as well.
//!
//! The unit of `cost` is not checked. The default [GreatCircle](crate::GreatCircle)
//! heuristic expects kilometers; tables with distances in degrees of
//! latitude/longitude need [GreatCircle::with_scale](crate::GreatCircle::with_scale)
//! with a scale of `1.0 / 111.2`.
//!
//! ```csv
//! name,lon,lat
//! Ningbo,121.544,29.8683
//! Hangzhou,120.1551,30.2741
//! ```
//!
//! ```csv
//! from,to,cost
//! Ningbo,Hangzhou,155
//! ```

use std::fs::File;
use std::io::{self, BufRead, Read};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{Graph, GraphError, Node};

/// Format of the input CSV file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Unknown format - guess the compression based on the content
    Unknown,

    /// Force uncompressed CSV
    Csv,

    /// Force CSV with [gzip](https://en.wikipedia.org/wiki/Gzip) compression
    CsvGz,

    /// Force CSV with [bzip2](https://en.wikipedia.org/wiki/Bzip2) compression
    CsvBz2,
}

impl FileFormat {
    /// Guesses the format from the extension of a file, returning
    /// [FileFormat::Unknown] for anything other than `.csv`, `.gz` and `.bz2`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some("csv") => Self::Csv,
            Some("gz") => Self::CsvGz,
            Some("bz2") => Self::CsvBz2,
            _ => Self::Unknown,
        }
    }

    fn sniff(header: &[u8]) -> Self {
        if header.starts_with(&[0x1F, 0x8B]) {
            Self::CsvGz
        } else if header.starts_with(b"BZh") {
            Self::CsvBz2
        } else {
            Self::Csv
        }
    }
}

/// Error conditions which may occur when loading a [Graph] from CSV files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("line {line}: {source}")]
    Graph {
        line: u64,
        #[source]
        source: GraphError,
    },

    #[error("line {line}: invalid position of {id}: {lat}, {lon}")]
    InvalidPosition {
        line: u64,
        id: String,
        lat: f64,
        lon: f64,
    },

    #[error("{0}: {1}")]
    File(PathBuf, #[source] Box<LoadError>),
}

#[derive(Debug, Deserialize)]
struct NodeRecord {
    #[serde(alias = "城市名")]
    name: String,

    #[serde(alias = "纬度")]
    lat: f64,

    #[serde(alias = "经度")]
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct EdgeRecord {
    #[serde(alias = "起点")]
    from: String,

    #[serde(alias = "终点")]
    to: String,

    #[serde(alias = "距离")]
    cost: f64,
}

fn decompress<'r, R: Read + 'r>(
    format: FileFormat,
    reader: R,
) -> Result<Box<dyn Read + 'r>, io::Error> {
    match format {
        FileFormat::Unknown => {
            let mut b = io::BufReader::new(reader);
            match FileFormat::sniff(b.fill_buf()?) {
                FileFormat::CsvGz => Ok(Box::new(flate2::read::MultiGzDecoder::new(b))),
                FileFormat::CsvBz2 => Ok(Box::new(bzip2::read::MultiBzDecoder::new(b))),
                _ => Ok(Box::new(b)),
            }
        }
        FileFormat::Csv => Ok(Box::new(reader)),
        FileFormat::CsvGz => Ok(Box::new(flate2::read::MultiGzDecoder::new(reader))),
        FileFormat::CsvBz2 => Ok(Box::new(bzip2::read::MultiBzDecoder::new(reader))),
    }
}

/// Parse cities from a CSV stream and add them to the [Graph].
/// Returns the number of parsed rows.
///
/// Cities already present in the graph have their positions updated.
/// The provided stream will be automatically wrapped in a buffered reader.
pub fn add_nodes_from_io<R: Read>(
    g: &mut Graph,
    format: FileFormat,
    reader: R,
) -> Result<usize, LoadError> {
    let mut r = csv::Reader::from_reader(decompress(format, reader)?);
    let headers = r.headers()?.clone();
    let mut count = 0;

    for record in r.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        let row: NodeRecord = record.deserialize(Some(&headers))?;

        if !(-90.0..=90.0).contains(&row.lat) || !(-180.0..=180.0).contains(&row.lon) {
            return Err(LoadError::InvalidPosition {
                line,
                id: row.name,
                lat: row.lat,
                lon: row.lon,
            });
        }

        if g.get_node(&row.name).is_some() {
            log::warn!("line {line}: duplicate city {}", row.name);
        }
        g.set_node(Node::new(row.name, row.lat, row.lon));
        count += 1;
    }

    Ok(count)
}

/// Parse connections from a CSV stream and add them to the [Graph].
/// Returns the number of added edges.
///
/// Rows referring to cities absent from the graph, or connecting a city to
/// itself, are skipped. Negative or non-finite costs are reported as errors.
/// The provided stream will be automatically wrapped in a buffered reader.
pub fn add_edges_from_io<R: Read>(
    g: &mut Graph,
    format: FileFormat,
    reader: R,
) -> Result<usize, LoadError> {
    let mut r = csv::Reader::from_reader(decompress(format, reader)?);
    let headers = r.headers()?.clone();
    let mut count = 0;

    for record in r.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        let row: EdgeRecord = record.deserialize(Some(&headers))?;

        match g.set_edge(&row.from, &row.to, row.cost) {
            Ok(()) => count += 1,
            Err(e @ (GraphError::UnknownNode(_) | GraphError::SelfLoop(_))) => {
                log::warn!("line {line}: skipping edge {} - {}: {e}", row.from, row.to);
            }
            Err(source) => return Err(LoadError::Graph { line, source }),
        }
    }

    Ok(count)
}

/// Parse cities from a file at the provided path, see [add_nodes_from_io].
pub fn add_nodes_from_file<P: AsRef<Path>>(g: &mut Graph, path: P) -> Result<usize, LoadError> {
    let path = path.as_ref();
    File::open(path)
        .map_err(LoadError::from)
        .and_then(|f| add_nodes_from_io(g, FileFormat::from_path(path), f))
        .map_err(|e| LoadError::File(path.to_path_buf(), Box::new(e)))
}

/// Parse connections from a file at the provided path, see [add_edges_from_io].
pub fn add_edges_from_file<P: AsRef<Path>>(g: &mut Graph, path: P) -> Result<usize, LoadError> {
    let path = path.as_ref();
    File::open(path)
        .map_err(LoadError::from)
        .and_then(|f| add_edges_from_io(g, FileFormat::from_path(path), f))
        .map_err(|e| LoadError::File(path.to_path_buf(), Box::new(e)))
}

/// Builds a new [Graph] from a node file and an edge file.
pub fn load_graph<P: AsRef<Path>, Q: AsRef<Path>>(
    nodes_path: P,
    edges_path: Q,
) -> Result<Graph, LoadError> {
    let mut g = Graph::default();
    let nodes = add_nodes_from_file(&mut g, nodes_path)?;
    let edges = add_edges_from_file(&mut g, edges_path)?;
    log::info!("loaded {nodes} cities and {edges} connections");
    Ok(g)
}
