#![no_main]
use ip2location::{Database, Fields};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Opening and querying garbage must fail cleanly, never panic
    let db = match Database::from_bytes(data.to_vec()) {
        Ok(db) => db,
        Err(_) => return,
    };

    for ip in [
        "0.0.0.0",
        "1.2.3.4",
        "255.255.255.255",
        "::",
        "2001:db8::1",
        "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff",
    ] {
        let _ = db.lookup(ip, Fields::all());
    }

    // Addresses taken from the input reach index slots and rows anywhere
    if data.len() >= 16 {
        let mut v6 = [0u8; 16];
        v6.copy_from_slice(&data[data.len() - 16..]);
        let _ = db.lookup_ip(std::net::Ipv6Addr::from(v6).into(), Fields::all());
        let v4 = [v6[0], v6[1], v6[2], v6[3]];
        let _ = db.lookup_ip(std::net::Ipv4Addr::from(v4).into(), Fields::all());
    }
});
