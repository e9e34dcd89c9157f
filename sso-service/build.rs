fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Use the vendored protoc unless one is provided explicitly
    if std::env::var_os("PROTOC").is_none() {
        std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    }

    println!("cargo:rerun-if-changed=../proto/sso.proto");

    // Generate gRPC code from proto files; the client is used by the integration tests
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile(&["../proto/sso.proto"], &["../proto"])?;

    Ok(())
}
