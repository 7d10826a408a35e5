// Copyright (C) 2015-2025 The Neo Project.
//
// result_iterator.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Paging through an iterator held in a node-side session.
//!
//! A session stays open on the node until [`ResultIterator::terminate_session`]
//! is called or it expires. Traversing after termination fails on the node.

use crate::error::{RpcError, RpcResult};
use crate::models::{RpcInvokeResult, StackItem};
use crate::rpc_client::RpcClient;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// Decodes iterator items into `T` with `mapper` as they are fetched.
pub struct ResultIterator<T, F>
where
    F: Fn(&StackItem) -> RpcResult<T>,
{
    client: Arc<RpcClient>,
    session_id: String,
    iterator_id: String,
    mapper: F,
    _item: PhantomData<fn() -> T>,
}

impl<T, F> ResultIterator<T, F>
where
    F: Fn(&StackItem) -> RpcResult<T>,
{
    pub fn new(
        client: Arc<RpcClient>,
        session_id: impl Into<String>,
        iterator_id: impl Into<String>,
        mapper: F,
    ) -> Self {
        Self {
            client,
            session_id: session_id.into(),
            iterator_id: iterator_id.into(),
            mapper,
            _item: PhantomData,
        }
    }

    /// Takes the iterator returned as the first stack item of `result`.
    ///
    /// Nodes without session support return no session id; call the method
    /// through `build_contract_call_and_unwrap_iterator` against those instead.
    pub fn from_invoke_result(
        client: Arc<RpcClient>,
        result: &RpcInvokeResult,
        mapper: F,
    ) -> RpcResult<Self> {
        if result.has_state_fault() {
            return Err(RpcError::VmFault {
                exception: result.exception.clone().unwrap_or_default(),
            });
        }
        let item = result
            .first_stack_item()
            .ok_or_else(|| RpcError::InvalidResponse("The invocation returned an empty stack".into()))?;
        let iterator_id = item.iterator_id().ok_or_else(|| {
            RpcError::InvalidResponse(format!(
                "Expected an InteropInterface iterator but got a {} stack item",
                item.type_name()
            ))
        })?;
        let session_id = result.session.as_deref().ok_or_else(|| {
            RpcError::illegal_state(
                "No session id was found. The connected node might not support sessions; \
                 unwrap the iterator in the script with build_contract_call_and_unwrap_iterator instead",
            )
        })?;
        Ok(Self::new(client, session_id, iterator_id, mapper))
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn iterator_id(&self) -> &str {
        &self.iterator_id
    }

    /// Fetches and decodes at most `count` further items in one request.
    pub async fn traverse(&self, count: usize) -> RpcResult<Vec<T>> {
        let items = self
            .client
            .traverse_iterator(&self.session_id, &self.iterator_id, count)
            .await?;
        debug!(target: "neo", session = %self.session_id, requested = count, received = items.len(), "iterator traversed");
        items.iter().map(&self.mapper).collect()
    }

    /// Releases the session on the node.
    pub async fn terminate_session(&self) -> RpcResult<bool> {
        self.client.terminate_session(&self.session_id).await
    }

    /// Fetches one page and then terminates the session, even if the fetch failed.
    pub async fn traverse_and_terminate(&self, count: usize) -> RpcResult<Vec<T>> {
        let items = self.traverse(count).await;
        let terminated = self.terminate_session().await;
        let items = items?;
        terminated?;
        Ok(items)
    }
}

impl<T, F> fmt::Debug for ResultIterator<T, F>
where
    F: Fn(&StackItem) -> RpcResult<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultIterator")
            .field("session_id", &self.session_id)
            .field("iterator_id", &self.iterator_id)
            .finish()
    }
}

/// Mapper that keeps the raw stack items.
pub fn raw_stack_item(item: &StackItem) -> RpcResult<StackItem> {
    Ok(item.clone())
}
