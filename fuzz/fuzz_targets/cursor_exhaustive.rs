//! Drive the cursor with reads derived from the input itself.

#![no_main]

use capstan_codec::Cursor;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((ops, region)) = data.split_first_chunk::<8>() else {
        return;
    };

    let mut cursor = Cursor::new(region);
    for op in ops {
        let _ = match op % 6 {
            0 => cursor.read_u16().map(|_| ()),
            1 => cursor.read_u32().map(|_| ()),
            2 => cursor.read_i32().map(|_| ()),
            3 => cursor.read_i64().map(|_| ()),
            4 => cursor.read_string().map(|_| ()),
            _ => cursor.read_bytes(usize::from(*op)).map(|_| ()),
        };
        assert!(cursor.position() <= region.len());
    }
});
