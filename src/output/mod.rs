// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Planar-code serialization.
//!
//! The stream starts with a 15-byte magic header. Each structure is one
//! vertex-count byte followed by, for every vertex in discovery order,
//! the numbers of its neighbors in rotation order terminated by a 0
//! byte. Discovery starts from vertex 0's entry arc and numbers
//! vertices breadth-first, the same traversal the canonical form uses.

use crate::constants::MAX_ORDER;
use crate::planemap::PlaneMap;
use std::io::{self, Write};

/// Magic header identifying a planar-code stream.
pub const PLANAR_CODE_HEADER: [u8; 15] = *b">>planar_code<<";

pub fn write_planar_header(out: &mut dyn Write) -> io::Result<()> {
    out.write_all(&PLANAR_CODE_HEADER)
}

/// Append one structure to the stream. Structures of fewer than two
/// vertices are not representable and are skipped.
pub fn write_planar_code(out: &mut dyn Write, map: &PlaneMap) -> io::Result<()> {
    if map.order() < 2 {
        return Ok(());
    }

    let mut code = Vec::with_capacity(1 + map.order() + map.size());
    code.push(map.order() as u8);

    let mut number = [0usize; MAX_ORDER];
    let mut start_edge = [0; MAX_ORDER];
    let root = map.first_edge(0);
    number[map.start(root)] = 1;
    number[map.end(root)] = 2;
    start_edge[0] = root;
    start_edge[1] = map.inverse(root);

    let mut last_number = 2;
    for actual in 0..map.order() {
        let entry = start_edge[actual];
        code.push(number[map.end(entry)] as u8);
        let mut run = map.next(entry);
        while run != entry {
            let vertex = map.end(run);
            if number[vertex] == 0 {
                start_edge[last_number] = map.inverse(run);
                last_number += 1;
                number[vertex] = last_number;
            }
            code.push(number[vertex] as u8);
            run = map.next(run);
        }
        code.push(0);
    }

    out.write_all(&code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::path_base;

    #[test]
    fn test_header_bytes() {
        let mut buffer = Vec::new();
        write_planar_header(&mut buffer).unwrap();
        assert_eq!(buffer, b">>planar_code<<");
    }

    #[test]
    fn test_path_base_code() {
        let (map, _, _) = path_base();
        let mut buffer = Vec::new();
        write_planar_code(&mut buffer, &map).unwrap();
        // 3 vertices; v1's block lists both neighbors, the pendant
        // blocks list one each.
        assert_eq!(buffer, vec![3, 2, 0, 1, 3, 0, 2, 0]);
        assert_eq!(buffer.len(), 1 + map.order() + map.size());
    }
}
