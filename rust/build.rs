use std::path::PathBuf;
use std::process::Command;

use prost::Message;

const PROTO_FILES: &[&str] = &[
    "proto/common.proto",
    "proto/instruments.proto",
    "proto/marketdata.proto",
    "proto/operations.proto",
    "proto/orders.proto",
    "proto/sandbox.proto",
    "proto/stoporders.proto",
    "proto/users.proto",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let protoc_path = protoc_bin_vendored::protoc_bin_path()?;
    let well_known = protoc_bin_vendored::include_path()?;
    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);
    let descriptor_path = out_dir.join("invest_descriptor.bin");

    // The descriptor set is embedded in the binary for reflective JSON rendering,
    // so it must carry the well-known imports as well.
    let status = Command::new(&protoc_path)
        .arg("--include_imports")
        .arg(format!("--descriptor_set_out={}", descriptor_path.display()))
        .arg("-I")
        .arg("proto")
        .arg("-I")
        .arg(&well_known)
        .args(PROTO_FILES)
        .status()?;
    if !status.success() {
        return Err(format!("protoc failed with {status}").into());
    }

    let descriptor_bytes = std::fs::read(&descriptor_path)?;
    let fds = prost_types::FileDescriptorSet::decode(descriptor_bytes.as_slice())?;

    tonic_prost_build::configure()
        .build_client(true)
        .build_server(true)
        .compile_fds(fds)?;

    println!("cargo:rerun-if-changed=build.rs");
    for proto in PROTO_FILES {
        println!("cargo:rerun-if-changed={proto}");
    }

    Ok(())
}
