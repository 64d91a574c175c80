use async_trait::async_trait;
use indexmap::IndexSet;
use std::sync::{Arc, Mutex};

use crate::command::handlers::explore::{
    EntityIdScope, EntityStoreFetcher, ExploreRequestContext, ExploreRequestHandler,
    LiveEntityResolver, RestGroupHandler,
};
use crate::command::types::{ExploreRequest, ExploreResponse, Row};
use crate::engine::errors::ExploreError;

#[derive(Clone)]
enum Behavior<T> {
    Return(T),
    Fail(ExploreError),
    Hang,
}

impl<T: Clone> Behavior<T> {
    async fn run(&self) -> Result<T, ExploreError> {
        match self {
            Behavior::Return(value) => Ok(value.clone()),
            Behavior::Fail(error) => Err(error.clone()),
            Behavior::Hang => std::future::pending().await,
        }
    }
}

/// Records every request it receives and answers with a fixed response.
pub struct StubHandler {
    behavior: Behavior<ExploreResponse>,
    requests: Mutex<Vec<ExploreRequest>>,
}

impl StubHandler {
    pub fn returning(rows: Vec<Row>) -> Arc<Self> {
        Arc::new(Self {
            behavior: Behavior::Return(ExploreResponse::from_rows(rows)),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(error: ExploreError) -> Arc<Self> {
        Arc::new(Self {
            behavior: Behavior::Fail(error),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn hanging() -> Arc<Self> {
        Arc::new(Self {
            behavior: Behavior::Hang,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<ExploreRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ExploreRequestHandler for StubHandler {
    async fn handle(
        &self,
        _ctx: &ExploreRequestContext,
        request: &ExploreRequest,
    ) -> Result<ExploreResponse, ExploreError> {
        self.requests.lock().unwrap().push(request.clone());
        self.behavior.run().await
    }
}

/// Returns fixed rest-group rows and records what it was called with.
pub struct StubRestGroupHandler {
    behavior: Behavior<Vec<Row>>,
    calls: Mutex<Vec<(ExploreRequest, ExploreResponse)>>,
}

impl StubRestGroupHandler {
    pub fn returning(rows: Vec<Row>) -> Arc<Self> {
        Arc::new(Self {
            behavior: Behavior::Return(rows),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(error: ExploreError) -> Arc<Self> {
        Arc::new(Self {
            behavior: Behavior::Fail(error),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<(ExploreRequest, ExploreResponse)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RestGroupHandler for StubRestGroupHandler {
    async fn rows_for_rest_group(
        &self,
        _ctx: &ExploreRequestContext,
        original: &ExploreRequest,
        response: &ExploreResponse,
    ) -> Result<Vec<Row>, ExploreError> {
        self.calls
            .lock()
            .unwrap()
            .push((original.clone(), response.clone()));
        self.behavior.run().await
    }
}

pub struct StubLiveEntities {
    behavior: Behavior<IndexSet<String>>,
    calls: Mutex<usize>,
}

impl StubLiveEntities {
    pub fn returning(ids: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            behavior: Behavior::Return(ids.iter().map(|id| id.to_string()).collect()),
            calls: Mutex::new(0),
        })
    }

    pub fn failing(error: ExploreError) -> Arc<Self> {
        Arc::new(Self {
            behavior: Behavior::Fail(error),
            calls: Mutex::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl LiveEntityResolver for StubLiveEntities {
    async fn live_entity_ids(
        &self,
        _ctx: &ExploreRequestContext,
        _request: &ExploreRequest,
    ) -> Result<IndexSet<String>, ExploreError> {
        *self.calls.lock().unwrap() += 1;
        self.behavior.run().await
    }
}

pub struct StubEntityStore {
    behavior: Behavior<Vec<Row>>,
    scopes: Mutex<Vec<EntityIdScope>>,
}

impl StubEntityStore {
    pub fn returning(rows: Vec<Row>) -> Arc<Self> {
        Arc::new(Self {
            behavior: Behavior::Return(rows),
            scopes: Mutex::new(Vec::new()),
        })
    }

    pub fn hanging() -> Arc<Self> {
        Arc::new(Self {
            behavior: Behavior::Hang,
            scopes: Mutex::new(Vec::new()),
        })
    }

    pub fn scopes(&self) -> Vec<EntityIdScope> {
        self.scopes.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.scopes.lock().unwrap().len()
    }
}

#[async_trait]
impl EntityStoreFetcher for StubEntityStore {
    async fn fetch_rows(
        &self,
        _ctx: &ExploreRequestContext,
        _request: &ExploreRequest,
        scope: &EntityIdScope,
    ) -> Result<Vec<Row>, ExploreError> {
        self.scopes.lock().unwrap().push(scope.clone());
        self.behavior.run().await
    }
}
