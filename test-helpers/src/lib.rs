pub mod mock;
pub mod server;
pub mod telemetry;

use actix_web::web;
use payloads::MdmsClient;
use reqwest::StatusCode;

use crate::mock::MdmsDataset;
use crate::server::{Config, MdmsState};

pub struct TestMdms {
    pub port: u16,
    pub client: MdmsClient,
    pub state: web::Data<MdmsState>,
}

impl TestMdms {
    /// Number of searches the server has received.
    pub fn search_count(&self) -> usize {
        self.state.requests().len()
    }
}

pub async fn spawn_mdms_on_port(port: u16, dataset: MdmsDataset) -> TestMdms {
    let subscriber = telemetry::get_subscriber("error");
    telemetry::try_init_subscriber(subscriber);

    let mut config = Config {
        ip: "127.0.0.1".into(),
        port,
        allowed_origins: vec!["*".into()],
    };
    let state = web::Data::new(MdmsState::new(dataset));

    let server = server::build(&mut config, state.clone()).unwrap();
    tokio::spawn(server);

    TestMdms {
        port: config.port,
        client: MdmsClient::new(format!("http://127.0.0.1:{}", config.port)),
        state,
    }
}

/// Fake MDMS with the seeded asset masters on an OS-assigned port, for
/// parallel testing.
pub async fn spawn_mdms() -> TestMdms {
    spawn_mdms_on_port(0, MdmsDataset::assets()).await
}

/// Assert that a client call failed with a specific status code.
pub fn assert_status_code<T>(
    result: Result<T, payloads::ClientError>,
    expected: StatusCode,
) {
    match result {
        Err(payloads::ClientError::APIError(code, _)) => {
            assert_eq!(code, expected)
        }
        _ => panic!("Expected APIError"),
    };
}
