//! Immutable two-layer bipartite instance and the PACE text-format parser.

use std::io::BufRead;

use ocm_core::{ErrorInfo, OcmError};

/// Immutable bipartite adjacency model, built once from input.
///
/// The fixed layer holds vertices `0..fixed_count` in their given left-to-right
/// order; the free layer holds vertices `0..free_count` whose order is the
/// optimization variable. Both adjacency tables are ascending-sorted and
/// mutually symmetric.
#[derive(Debug, Clone)]
pub struct Instance {
    fixed_count: u32,
    free_count: u32,
    edge_count: u32,
    fixed_adj: Vec<Vec<u32>>,
    free_adj: Vec<Vec<u32>>,
    active: Vec<u32>,
    max_free_degree: u32,
}

impl Instance {
    /// Builds an instance from layer sizes and 0-based (fixed, free) edges.
    pub fn from_edges(
        fixed_count: u32,
        free_count: u32,
        edges: &[(u32, u32)],
    ) -> Result<Self, OcmError> {
        let mut fixed_adj = vec![Vec::new(); fixed_count as usize];
        let mut free_adj = vec![Vec::new(); free_count as usize];

        for &(fixed, free) in edges {
            if fixed >= fixed_count || free >= free_count {
                return Err(OcmError::Instance(
                    ErrorInfo::new("endpoint-out-of-range", "edge endpoint outside layer bounds")
                        .with_context("fixed", fixed.to_string())
                        .with_context("free", free.to_string()),
                ));
            }
            fixed_adj[fixed as usize].push(free);
            free_adj[free as usize].push(fixed);
        }

        for list in fixed_adj.iter_mut().chain(free_adj.iter_mut()) {
            list.sort_unstable();
        }

        let mut active = Vec::new();
        let mut max_free_degree = 0u32;
        for (v, list) in free_adj.iter().enumerate() {
            if !list.is_empty() {
                active.push(v as u32);
            }
            max_free_degree = max_free_degree.max(list.len() as u32);
        }

        Ok(Self {
            fixed_count,
            free_count,
            edge_count: edges.len() as u32,
            fixed_adj,
            free_adj,
            active,
            max_free_degree,
        })
    }

    /// Parses the PACE OCR text format from a reader.
    ///
    /// Comment lines start with `c`; the single header line reads
    /// `p ocr <fixed> <free> <edges>` (a trailing parameterized-track field is
    /// tolerated); every following non-blank line is an edge `a b` of 1-based
    /// global ids, with fixed ids in `[1, fixed]` and free ids in
    /// `(fixed, fixed + free]`. Malformed headers, malformed edge lines, and
    /// out-of-range endpoints are fatal.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, OcmError> {
        let mut header: Option<(u32, u32)> = None;
        let mut edges: Vec<(u32, u32)> = Vec::new();

        for (lineno, line) in reader.lines().enumerate() {
            let line = line.map_err(|err| {
                OcmError::Instance(
                    ErrorInfo::new("read-failed", err.to_string())
                        .with_context("line", (lineno + 1).to_string()),
                )
            })?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('c') {
                continue;
            }

            if trimmed.starts_with('p') {
                if header.is_some() {
                    return Err(parse_error("duplicate-header", lineno, trimmed));
                }
                let fields: Vec<&str> = trimmed.split_whitespace().collect();
                // "p ocr n0 n1 m" plus an optional parameterized-track field.
                if fields.len() < 5 || fields.len() > 6 {
                    return Err(parse_error("malformed-header", lineno, trimmed));
                }
                let fixed = parse_count(fields[2], lineno, trimmed)?;
                let free = parse_count(fields[3], lineno, trimmed)?;
                let declared = parse_count(fields[4], lineno, trimmed)? as usize;
                edges.reserve(declared);
                header = Some((fixed, free));
                continue;
            }

            let Some((fixed_count, free_count)) = header else {
                return Err(parse_error("edge-before-header", lineno, trimmed));
            };
            let fields: Vec<&str> = trimmed.split_whitespace().collect();
            if fields.len() != 2 {
                return Err(parse_error("malformed-edge", lineno, trimmed));
            }
            let a = parse_count(fields[0], lineno, trimmed)?;
            let b = parse_count(fields[1], lineno, trimmed)?;
            let total = fixed_count as u64 + free_count as u64;
            if a < 1 || b < 1 || a as u64 > total || b as u64 > total {
                return Err(parse_error("endpoint-out-of-range", lineno, trimmed));
            }
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            if lo > fixed_count || hi <= fixed_count {
                return Err(parse_error("not-bipartite", lineno, trimmed));
            }
            edges.push((lo - 1, hi - fixed_count - 1));
        }

        let Some((fixed_count, free_count)) = header else {
            return Err(OcmError::Instance(ErrorInfo::new(
                "missing-header",
                "input contains no problem header line",
            )));
        };

        Self::from_edges(fixed_count, free_count, &edges)
    }

    /// Number of fixed-layer vertices.
    pub fn fixed_count(&self) -> u32 {
        self.fixed_count
    }

    /// Number of free-layer vertices.
    pub fn free_count(&self) -> u32 {
        self.free_count
    }

    /// Number of edges.
    pub fn edge_count(&self) -> u32 {
        self.edge_count
    }

    /// Ascending fixed-layer neighbors of the given free vertex.
    pub fn fixed_neighbors(&self, free: u32) -> &[u32] {
        &self.free_adj[free as usize]
    }

    /// Ascending free-layer neighbors of the given fixed vertex.
    pub fn free_neighbors(&self, fixed: u32) -> &[u32] {
        &self.fixed_adj[fixed as usize]
    }

    /// Free vertices with at least one neighbor, ascending.
    pub fn active(&self) -> &[u32] {
        &self.active
    }

    /// Maximum degree over free-layer vertices.
    pub fn max_free_degree(&self) -> u32 {
        self.max_free_degree
    }
}

fn parse_error(code: &str, lineno: usize, line: &str) -> OcmError {
    OcmError::Instance(
        ErrorInfo::new(code, format!("invalid input line: {line:?}"))
            .with_context("line", (lineno + 1).to_string()),
    )
}

fn parse_count(field: &str, lineno: usize, line: &str) -> Result<u32, OcmError> {
    field
        .parse::<u32>()
        .map_err(|_| parse_error("not-a-number", lineno, line))
}
