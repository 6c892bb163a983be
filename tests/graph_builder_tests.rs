use gryphon_mapf::adapters::outbound::FilesystemDataSource;
use gryphon_mapf::common::DomainError;
use gryphon_mapf::domains::mapf::{Coord, MapDataSource, Roadmap, SpatialTopology, Topology};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_line_builder() {
    let line = Roadmap::line(4);
    assert_eq!(line.node_count(), 4);
    assert_eq!(line.edge_count(), 3);
    assert_eq!(line.neighbors(1), vec![0, 2]);
    assert_eq!(line.coordinates(3), Coord(3.0, 0.0));
}

#[test]
fn test_grid_builder() {
    let grid = Roadmap::grid(3, 2);
    assert_eq!(grid.node_count(), 6);
    // 2 rows of 2 horizontal edges plus 3 vertical edges
    assert_eq!(grid.edge_count(), 7);
    assert_eq!(grid.neighbors(4), vec![1, 3, 5]);
    assert_eq!(grid.coordinates(5), Coord(2.0, 1.0));
}

#[test]
fn test_within_range_links_nearby_vertices() {
    let grid = Roadmap::grid(3, 3);
    let communication = Roadmap::within_range(&grid, 1.5);
    assert_eq!(communication.node_count(), 9);
    assert!(communication.are_connected(0, 4));
    assert!(communication.are_connected(4, 0));
    assert!(!communication.are_connected(0, 2));
    assert!(!communication.are_connected(0, 0));
}

#[test]
fn test_add_edge_rejects_unknown_vertex() {
    let mut roadmap = Roadmap::from_coords(vec![Coord(0.0, 0.0), Coord(1.0, 0.0)]);
    assert!(roadmap.add_edge(0, 1).is_ok());
    assert!(roadmap.add_edge(0, 1).is_ok());
    assert_eq!(roadmap.edge_count(), 1);
    assert!(matches!(roadmap.add_edge(1, 2), Err(DomainError::InvalidGraph { .. })));
}

#[test]
fn test_json_graph_round_trip() {
    let dir = tempdir().unwrap();
    let ds = FilesystemDataSource::new(Some(dir.path().to_path_buf()));

    let grid = Roadmap::grid(2, 2);
    ds.save_graph("square.json", &grid).unwrap();
    assert!(dir.path().join("graphs").join("square.json").exists());

    let loaded = ds.load_graph("square.json").unwrap();
    assert_eq!(loaded.to_document(), grid.to_document());
}

#[test]
fn test_hand_written_json_graph() {
    let dir = tempdir().unwrap();
    let graphs = dir.path().join("graphs");
    fs::create_dir_all(&graphs).unwrap();
    fs::write(
        graphs.join("triangle.json"),
        r#"{
  "vertices": [ {"x": 0.0, "y": 0.0}, {"x": 1.0, "y": 0.0}, {"x": 0.5, "y": 1.0} ],
  "edges": [ [0, 1], [1, 2] ]
}"#,
    )
    .unwrap();

    let ds = FilesystemDataSource::new(Some(dir.path().to_path_buf()));
    let graph = ds.load_graph("triangle.json").unwrap();
    assert_eq!(graph.node_count(), 3);
    assert!(graph.are_connected(2, 1));
    assert!(!graph.are_connected(0, 2));
}

#[test]
fn test_json_graph_with_bad_edge_is_rejected() {
    let dir = tempdir().unwrap();
    let graphs = dir.path().join("graphs");
    fs::create_dir_all(&graphs).unwrap();
    fs::write(graphs.join("bad.json"), r#"{"vertices": [{"x": 0.0, "y": 0.0}], "edges": [[0, 3]]}"#).unwrap();

    let ds = FilesystemDataSource::new(Some(dir.path().to_path_buf()));
    assert!(matches!(ds.load_graph("bad.json"), Err(DomainError::InvalidGraph { .. })));
}

#[test]
fn test_binary_graph_round_trip() {
    let dir = tempdir().unwrap();
    let ds = FilesystemDataSource::new(Some(dir.path().to_path_buf()));

    let grid = Roadmap::grid(3, 3);
    ds.save_graph("grid.pgph", &grid).unwrap();
    let bytes = fs::read(dir.path().join("graphs").join("grid.pgph")).unwrap();
    assert_eq!(&bytes[..4], b"PGPH");
    assert_eq!(bytes[4], 1);

    let loaded = ds.load_graph("grid.pgph").unwrap();
    assert_eq!(loaded.node_count(), 9);
    assert_eq!(loaded.to_document(), grid.to_document());
}

#[test]
fn test_legacy_binary_without_header() {
    let line = Roadmap::line(3);
    let payload = bincode::serialize(&line).unwrap();
    let mut bytes = b"PGPH".to_vec();
    bytes.push(0);
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&payload);

    let decoded = FilesystemDataSource::decode_binary(&bytes).unwrap();
    assert_eq!(decoded.edges(), line.edges());
}

#[test]
fn test_binary_rejects_bad_magic_and_future_version() {
    assert!(matches!(
        FilesystemDataSource::decode_binary(b"NOPE\x01\x00\x00\x00\x00"),
        Err(DomainError::InvalidGraph { .. })
    ));

    let mut bytes = FilesystemDataSource::encode_binary(&Roadmap::line(2)).unwrap();
    bytes[4] = 9;
    assert!(matches!(FilesystemDataSource::decode_binary(&bytes), Err(DomainError::InvalidGraph { .. })));
}

#[test]
fn test_missing_graph_file_returns_error() {
    let dir = tempdir().unwrap();
    let ds = FilesystemDataSource::new(Some(dir.path().to_path_buf()));
    assert!(matches!(ds.load_graph("absent.pgph"), Err(DomainError::InfrastructureError(_))));
}
