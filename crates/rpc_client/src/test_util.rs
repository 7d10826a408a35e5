// Copyright (C) 2015-2025 The Neo Project.
//
// test_util.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Mock node helpers shared by the unit tests.

use mockito::{Matcher, Mock, Server};
use serde_json::{json, Value};
use std::net::TcpListener;

/// Sandboxes that forbid binding localhost skip the mock node tests.
pub fn localhost_binding_permitted() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

pub fn rpc_response(result: Value) -> String {
    json!({ "jsonrpc": "2.0", "id": 1, "result": result }).to_string()
}

pub fn rpc_error(code: i32, message: &str) -> String {
    json!({ "jsonrpc": "2.0", "id": 1, "error": { "code": code, "message": message } }).to_string()
}

pub fn method_matcher(method: &str) -> Matcher {
    Matcher::Regex(format!(r#""method"\s*:\s*"{method}""#))
}

/// Answers every `method` call with `result`, expecting `hits` calls.
pub async fn mock_method(server: &mut Server, method: &str, result: Value, hits: usize) -> Mock {
    server
        .mock("POST", "/")
        .match_body(method_matcher(method))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(rpc_response(result))
        .expect(hits)
        .create_async()
        .await
}
