/*! Integration tests for docstate-marklogic.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - state: Tests for State, Value and StateDiff
 * - codec: Tests for the XML serializer and deserializer, including the round trip
 * - query: Tests for the simple, query-by-example and full query builders
 * - patch: Tests for the update and lock patch builders
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("docstate_marklogic=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod helpers;
mod patch;
mod query;
