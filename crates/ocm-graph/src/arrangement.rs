//! Order and coordinate representations of a free-layer arrangement, plus
//! solution-file I/O in the one-id-per-line format.

use std::io::{BufRead, Write};

use ocm_core::{ErrorInfo, OcmError};

use crate::instance::Instance;

/// Left-to-right placement: a permutation of the active free vertices.
pub type Order = Vec<u32>;

/// Inverse mapping: free vertex to position.
pub type Coords = Vec<u32>;

/// Rank-normalizes coordinates in place so they become `0..len`, preserving
/// relative order and breaking ties by vertex id.
pub fn normalize(coords: &mut Coords) {
    let mut pairs: Vec<(u32, u32)> = coords
        .iter()
        .enumerate()
        .map(|(v, &c)| (c, v as u32))
        .collect();
    pairs.sort_unstable();
    for (rank, &(_, v)) in pairs.iter().enumerate() {
        coords[v as usize] = rank as u32;
    }
}

/// Converts coordinates to the order they induce (ties broken by vertex id).
pub fn to_order(coords: &Coords) -> Order {
    let mut pairs: Vec<(u32, u32)> = coords
        .iter()
        .enumerate()
        .map(|(v, &c)| (c, v as u32))
        .collect();
    pairs.sort_unstable();
    pairs.into_iter().map(|(_, v)| v).collect()
}

/// Converts an order to coordinates over the full free layer; vertices absent
/// from the order keep position 0.
pub fn to_coords(instance: &Instance, order: &[u32]) -> Coords {
    let mut coords = vec![0u32; instance.free_count() as usize];
    for (pos, &v) in order.iter().enumerate() {
        coords[v as usize] = pos as u32;
    }
    coords
}

/// Writes the solution: each placed free vertex as its 1-based global id, one
/// per line, followed by every never-placed free vertex in ascending id
/// order. Always emits exactly `free_count` lines with no duplicates.
pub fn write_solution<W: Write>(
    instance: &Instance,
    order: &[u32],
    writer: &mut W,
) -> Result<(), OcmError> {
    let mut listed = vec![false; instance.free_count() as usize];
    let offset = instance.fixed_count() as u64;
    for &v in order {
        listed[v as usize] = true;
        writeln!(writer, "{}", offset + v as u64 + 1).map_err(write_error)?;
    }
    for (v, seen) in listed.iter().enumerate() {
        if !seen {
            writeln!(writer, "{}", offset + v as u64 + 1).map_err(write_error)?;
        }
    }
    writer.flush().map_err(write_error)
}

/// Reads a solution written by [`write_solution`] back into an order of
/// 0-based free vertices.
pub fn read_solution<R: BufRead>(instance: &Instance, reader: R) -> Result<Order, OcmError> {
    let offset = instance.fixed_count() as u64;
    let limit = offset + instance.free_count() as u64;
    let mut order = Vec::with_capacity(instance.free_count() as usize);
    for line in reader.lines() {
        let line = line.map_err(|err| {
            OcmError::Arrangement(ErrorInfo::new("read-failed", err.to_string()))
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let id: u64 = trimmed.parse().map_err(|_| {
            OcmError::Arrangement(
                ErrorInfo::new("malformed-solution-line", format!("not a vertex id: {trimmed:?}")),
            )
        })?;
        if id <= offset || id > limit {
            return Err(OcmError::Arrangement(
                ErrorInfo::new("id-out-of-range", "solution id outside the free layer")
                    .with_context("id", id.to_string()),
            ));
        }
        order.push((id - offset - 1) as u32);
    }
    Ok(order)
}

fn write_error(err: std::io::Error) -> OcmError {
    OcmError::Arrangement(ErrorInfo::new("write-failed", err.to_string()))
}
