// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CalendarClient, ClientConfig};
use std::net::TcpListener;
use std::time::Duration;
use wiremock::MockServer;

/// Builds a client whose base URL is `<mock server>/api`.
pub fn client_for(server: &MockServer) -> CalendarClient {
    let config: ClientConfig =
        ClientConfig::new(&format!("{}/api", server.uri()), Duration::from_secs(5)).unwrap();
    CalendarClient::new(&config).unwrap()
}

/// A base URL nothing is listening on.
pub fn unreachable_base_url() -> String {
    let listener: TcpListener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port: u16 = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/api")
}
