//! Integration tests for the reader across sources and segments.

use std::io::{Cursor, SeekFrom};

use pretty_assertions::assert_eq;
use uasset_parser::names::NameMap;
use uasset_parser::reader::AssetReader;
use uasset_parser::versions::PackageVersion;
use uasset_parser::writer::AssetWriter;
use uasset_parser::Error;

#[test]
fn bulk_data_offsets_survive_the_stream_switch() {
    // A primary stream recording an offset that physically lives in the
    // bulk file: offsets are virtual, spanning both sources.
    let primary_size = 32u64;
    let bulk: Vec<u8> = (0u8..16).collect();

    let mut w = AssetWriter::new_in_memory();
    w.write_bytes(&[0u8; 24]).unwrap();
    w.write_u64(primary_size + 5).unwrap(); // virtual offset of a bulk byte
    let primary = w.into_inner();

    let mut r = AssetReader::from_bytes(primary, PackageVersion::default());
    r.seek(SeekFrom::Start(24)).unwrap();
    let virtual_offset = r.read_u64().unwrap();

    r.change_stream(Cursor::new(bulk), 16);
    assert_eq!(r.fake_position(), primary_size);

    // Translate the recorded virtual offset into the bulk segment.
    let local = virtual_offset - (r.fake_size() - r.size());
    r.seek(SeekFrom::Start(local)).unwrap();
    assert_eq!(r.fake_position(), virtual_offset);
    assert_eq!(r.read_u8().unwrap(), 5);
}

#[test]
fn fake_position_advances_one_to_one() {
    let mut r = AssetReader::from_bytes(vec![0; 8], PackageVersion::default());
    r.read_bytes(8).unwrap();
    r.change_stream(Cursor::new(vec![0; 8]), 8);

    let mut previous = r.fake_position();
    for _ in 0..8 {
        r.read_u8().unwrap();
        assert_eq!(r.fake_position(), previous + 1);
        previous = r.fake_position();
    }
}

#[test]
fn reader_over_a_file_source() {
    let dir = std::env::temp_dir();
    let path = dir.join(format!("uasset-reader-test-{}.bin", std::process::id()));
    std::fs::write(&path, [0x2A, 0, 0, 0]).unwrap();

    let mut r = AssetReader::open(&path, PackageVersion::default()).unwrap();
    assert_eq!(r.size(), 4);
    assert_eq!(r.read_u32().unwrap(), 0x2A);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn name_then_object_reads_share_one_cursor() {
    let names: NameMap = ["None", "StaticMesh"].into_iter().collect();

    let mut w = AssetWriter::new_in_memory();
    w.write_i32(1).unwrap(); // name index
    w.write_i32(3).unwrap(); // instance number
    w.write_i32(0).unwrap(); // null object reference
    w.write_u32(0xABCD).unwrap(); // sibling field

    let mut r = AssetReader::from_bytes(w.into_inner(), PackageVersion::default());
    let name = r.read_name(&names).unwrap();
    assert_eq!(name.to_string(), "StaticMesh_2");

    let index = r.read_package_index().unwrap();
    assert!(index.is_null());

    // Cursor sits exactly at the sibling field.
    assert_eq!(r.read_u32().unwrap(), 0xABCD);
}

#[test]
fn fatal_errors_leave_no_usable_result() {
    // A bulk array whose declared size lies: the decode fails rather
    // than returning a truncated sequence.
    let mut w = AssetWriter::new_in_memory();
    w.write_bulk_array(3, &[1u32, 2], |w, v| w.write_u32(*v)).unwrap();

    let mut r = AssetReader::from_bytes(w.into_inner(), PackageVersion::default());
    assert!(matches!(
        r.read_bulk_array(|r| r.read_u32()),
        Err(Error::BulkSizeMismatch {
            declared: 3,
            serialized: 4
        })
    ));
}
