// Export OpenAPI specification as JSON
//
// Usage: cargo run --bin export-openapi > docs/api/openapi.json
//
// This binary generates the OpenAPI spec without starting the API server.

use holdyard_control_plane::openapi::ApiDoc;

fn main() -> anyhow::Result<()> {
    println!("{}", ApiDoc::to_json()?);
    Ok(())
}
