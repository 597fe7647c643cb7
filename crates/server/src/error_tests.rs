// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    validation = { nk_core::Error::validation("Title is required"), StatusCode::BAD_REQUEST },
    bad_status = { nk_core::Error::InvalidStatus("gone".into()), StatusCode::BAD_REQUEST },
    not_found = { nk_core::Error::NotFound("n-1".into()), StatusCode::NOT_FOUND },
    user_not_found = { nk_core::Error::UserNotFound("ann@example.com".into()), StatusCode::NOT_FOUND },
    conflict = { nk_core::Error::Conflict("ann@example.com".into()), StatusCode::CONFLICT },
    store = { nk_core::Error::CorruptedData("bad row".into()), StatusCode::INTERNAL_SERVER_ERROR },
)]
fn core_errors_map_to_status(err: nk_core::Error, expected: StatusCode) {
    assert_eq!(Error::from(err).into_response().status(), expected);
}

#[test]
fn malformed_query_is_bad_request() {
    let response = Error::MalformedQuery("bad flag".into()).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[parameterized(
    unauthorized = { Error::Unauthorized("Invalid credentials".into()), StatusCode::UNAUTHORIZED },
    forbidden = { Error::Forbidden("Token does not match email".into()), StatusCode::FORBIDDEN },
    hash = { Error::Hash("out of memory".into()), StatusCode::INTERNAL_SERVER_ERROR },
)]
fn account_errors_map_to_status(err: Error, expected: StatusCode) {
    assert_eq!(err.into_response().status(), expected);
}
