//! Focused unit tests covering the nearby command.

use super::helpers::{Workspace, capture};
use super::*;
use crate::nearby::{
    ENV_NEARBY_LATITUDE, ENV_NEARBY_LONGITUDE, NearbyArgs, NearbyConfig, SearchOrigin,
    execute_nearby,
};
use crate::places::{AddConfig, execute_add};
use bucketlist_core::LocationId;
use bucketlist_data::nearby::{DEFAULT_ENDPOINT, DEFAULT_USER_AGENT, GeoSearchConfig};
use geo::Coord;
use rstest::rstest;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A mock geosearch service running on its own runtime, so the command under
/// test can block on a runtime of its own.
struct GeoSearchServer {
    server: MockServer,
    runtime: tokio::runtime::Runtime,
}

impl GeoSearchServer {
    fn start() -> Self {
        let runtime = tokio::runtime::Runtime::new().expect("server runtime");
        let server = runtime.block_on(MockServer::start());
        Self { server, runtime }
    }

    fn respond(&self, expected_coord: &str, body: serde_json::Value) {
        self.runtime.block_on(
            Mock::given(method("GET"))
                .and(path("/w/api.php"))
                .and(query_param("ggscoord", expected_coord))
                .respond_with(ResponseTemplate::new(200).set_body_json(body))
                .mount(&self.server),
        );
    }

    fn search_config(&self) -> GeoSearchConfig {
        GeoSearchConfig::new(format!("{}/w/api.php", self.server.uri()))
            .with_timeout(Duration::from_secs(5))
    }
}

fn pages_body() -> serde_json::Value {
    json!({
        "query": {"pages": {
            "10": {"pageid": 10, "title": "Victoria Memorial", "terms": {"description": ["monument in London"]}},
            "11": {"pageid": 11, "title": "Green Park"}
        }}
    })
}

#[rstest]
fn converting_nearby_without_origin_errors() {
    let err = NearbyConfig::try_from(NearbyArgs::default()).expect_err("origin is required");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_LATITUDE);
            assert_eq!(env, ENV_NEARBY_LATITUDE);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn converting_nearby_with_latitude_only_errors() {
    let args = NearbyArgs {
        lat: Some(51.501),
        ..NearbyArgs::default()
    };
    let err = NearbyConfig::try_from(args).expect_err("longitude is required");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_LONGITUDE);
            assert_eq!(env, ENV_NEARBY_LONGITUDE);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
#[case(Some(51.501), Some(-0.141), ARG_LATITUDE)]
#[case(None, Some(-0.141), ARG_LONGITUDE)]
fn converting_nearby_with_id_and_coordinate_errors(
    #[case] lat: Option<f64>,
    #[case] lon: Option<f64>,
    #[case] expected: &'static str,
) {
    let args = NearbyArgs {
        id: Some(LocationId::generate()),
        lat,
        lon,
        ..NearbyArgs::default()
    };
    let err = NearbyConfig::try_from(args).expect_err("origins should conflict");
    match err {
        CliError::ConflictingArguments { first, second } => {
            assert_eq!(first, ARG_ID);
            assert_eq!(second, expected);
        }
        other => panic!("expected ConflictingArguments, found {other:?}"),
    }
}

#[rstest]
fn layered_coordinate_conflicts_with_cli_id() {
    use ortho_config::MergeComposer;

    let id = LocationId::generate();
    let mut composer = MergeComposer::new();
    composer.push_environment(json!({ "lat": 51.501, "lon": -0.141 }));
    composer.push_cli(json!({ "id": id.to_string() }));

    let merged = NearbyArgs::merge_from_layers(composer.layers()).expect("layers should merge");
    assert_eq!(merged.id, Some(id));
    let err = NearbyConfig::try_from(merged).expect_err("origins should conflict");
    assert!(
        matches!(err, CliError::ConflictingArguments { .. }),
        "got {err:?}"
    );
}

#[rstest]
fn nearby_defaults_to_wikipedia() {
    let args = NearbyArgs {
        lat: Some(51.501),
        lon: Some(-0.141),
        ..NearbyArgs::default()
    };
    let config = NearbyConfig::try_from(args).expect("config should build");
    assert_eq!(
        config.origin,
        SearchOrigin::Coordinate(Coord {
            x: -0.141,
            y: 51.501
        })
    );
    assert_eq!(config.search.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(config.search.user_agent, DEFAULT_USER_AGENT);
    assert_eq!(config.search.timeout, None);
}

#[rstest]
fn nearby_applies_overrides() {
    let args = NearbyArgs {
        id: Some(LocationId::generate()),
        endpoint: Some("http://localhost:9999/api.php".to_owned()),
        user_agent: Some("tester/1.0".to_owned()),
        timeout_secs: Some(3),
        store_path: Some(Utf8PathBuf::from("SavedPlaces")),
        ..NearbyArgs::default()
    };
    let config = NearbyConfig::try_from(args).expect("config should build");
    assert!(matches!(config.origin, SearchOrigin::Saved { .. }));
    assert_eq!(config.search.endpoint, "http://localhost:9999/api.php");
    assert_eq!(config.search.user_agent, "tester/1.0");
    assert_eq!(config.search.timeout, Some(Duration::from_secs(3)));
}

#[rstest]
fn nearby_prints_pages_sorted_by_title() {
    let server = GeoSearchServer::start();
    server.respond("51.501|-0.141", pages_body());
    let config = NearbyConfig {
        origin: SearchOrigin::Coordinate(Coord {
            x: -0.141,
            y: 51.501,
        }),
        search: server.search_config(),
    };

    let output = capture(|writer| execute_nearby(config, writer));

    assert_eq!(
        output,
        "Green Park\tNo description available\nVictoria Memorial\tmonument in London\n"
    );
}

#[rstest]
fn nearby_searches_around_saved_place() {
    let workspace = Workspace::new();
    let added = capture(|writer| {
        execute_add(
            &AddConfig {
                coordinate: Coord { x: 2.2945, y: 48.8584 },
                store: workspace.store_options(),
            },
            writer,
        )
    });
    let id: LocationId = added.trim().parse().expect("add prints the id");

    let server = GeoSearchServer::start();
    server.respond("48.8584|2.2945", pages_body());
    let config = NearbyConfig {
        origin: SearchOrigin::Saved {
            id,
            store: workspace.store_options(),
        },
        search: server.search_config(),
    };

    let output = capture(|writer| execute_nearby(config, writer));
    assert_eq!(output.lines().count(), 2);
}

#[rstest]
fn nearby_reports_service_errors() {
    let server = GeoSearchServer::start();
    server.runtime.block_on(
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server.server),
    );
    let config = NearbyConfig {
        origin: SearchOrigin::Coordinate(Coord { x: 0.0, y: 0.0 }),
        search: server.search_config(),
    };

    let err = execute_nearby(config, &mut Vec::new()).expect_err("server error should fail");
    assert!(matches!(err, CliError::Fetch(_)), "got {err:?}");
}

#[rstest]
fn nearby_unknown_saved_place_errors() {
    let workspace = Workspace::new();
    let missing = LocationId::generate();
    let config = NearbyConfig {
        origin: SearchOrigin::Saved {
            id: missing,
            store: workspace.store_options(),
        },
        search: GeoSearchConfig::new("http://127.0.0.1:9/w/api.php"),
    };

    let err = execute_nearby(config, &mut Vec::new()).expect_err("unknown id should fail");
    match err {
        CliError::UnknownLocation { id } => assert_eq!(id, missing),
        other => panic!("expected UnknownLocation, found {other:?}"),
    }
}
