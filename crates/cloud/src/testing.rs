//! In-memory cloud for tests.
//!
//! [`ScriptedCloud`] plays back scripted describe and mutate responses and
//! records every call, so tests can assert how many remote mutations an
//! action issued and what it asked for.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::{
    CloudApi, CloudConnector, CloudError, Description, Filter, Mutation, Observation,
    ProviderParams, ResourceKind, Submission,
};

/// Build an instance observation with fixed size and address.
pub fn instance(id: &str, state: &str) -> Observation {
    Observation {
        id: id.to_owned(),
        state: state.to_owned(),
        cpu: 2,
        memory: 4,
        private_ips: vec!["10.0.0.8".to_owned()],
        ..Observation::default()
    }
}

type Scripted<T> = Result<T, CloudError>;

/// Scripted fake implementing both [`CloudApi`] and [`CloudConnector`].
///
/// Describe responses are consumed in order; once one is left it repeats
/// forever. With nothing scripted, describe finds nothing. Scripted
/// observations are filtered by the request's [`Filter`] before being
/// returned. Mutations succeed unless a failure is scripted; `RunInstance`
/// reports ids `ins-1`, `ins-2`, ... unless ids are scripted.
///
/// Clones share state, and [`CloudConnector::connect`] hands out clones.
#[derive(Debug, Clone, Default)]
pub struct ScriptedCloud {
    inner: Arc<Mutex<State>>,
}

#[derive(Debug, Default)]
struct State {
    describes: VecDeque<Scripted<Vec<Observation>>>,
    mutates: VecDeque<Scripted<Vec<String>>>,
    connect_error: Option<CloudError>,
    mutation_log: Vec<Mutation>,
    describe_log: Vec<Filter>,
    connections: Vec<ProviderParams>,
    requests: u64,
    launched: u64,
}

impl State {
    fn next_request_id(&mut self) -> String {
        self.requests += 1;
        format!("req-{}", self.requests)
    }
}

impl ScriptedCloud {
    /// An empty cloud.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a describe response.
    pub fn describe_returns(self, observations: Vec<Observation>) -> Self {
        self.inner.lock().describes.push_back(Ok(observations));
        self
    }

    /// Queue the same describe response `times` times.
    pub fn describe_returns_times(self, observations: Vec<Observation>, times: usize) -> Self {
        {
            let mut state = self.inner.lock();
            for _ in 0..times {
                state.describes.push_back(Ok(observations.clone()));
            }
        }
        self
    }

    /// Queue a describe failure.
    pub fn describe_fails(self, error: CloudError) -> Self {
        self.inner.lock().describes.push_back(Err(error));
        self
    }

    /// Queue the ids reported by the next mutation.
    pub fn mutate_returns<I, S>(self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids = ids.into_iter().map(Into::into).collect();
        self.inner.lock().mutates.push_back(Ok(ids));
        self
    }

    /// Queue a mutation failure.
    pub fn mutate_fails(self, error: CloudError) -> Self {
        self.inner.lock().mutates.push_back(Err(error));
        self
    }

    /// Make every `connect` fail.
    pub fn connect_fails(self, error: CloudError) -> Self {
        self.inner.lock().connect_error = Some(error);
        self
    }

    /// Every mutation received, in order.
    pub fn mutations(&self) -> Vec<Mutation> {
        self.inner.lock().mutation_log.clone()
    }

    /// Number of mutations received.
    pub fn mutation_count(&self) -> usize {
        self.inner.lock().mutation_log.len()
    }

    /// Filters of every describe received, in order.
    pub fn describes(&self) -> Vec<Filter> {
        self.inner.lock().describe_log.clone()
    }

    /// Number of describes received.
    pub fn describe_count(&self) -> usize {
        self.inner.lock().describe_log.len()
    }

    /// Provider params of every `connect`, in order.
    pub fn connections(&self) -> Vec<ProviderParams> {
        self.inner.lock().connections.clone()
    }
}

#[async_trait]
impl CloudApi for ScriptedCloud {
    async fn mutate(&self, mutation: Mutation) -> Result<Submission, CloudError> {
        let mut state = self.inner.lock();
        let launches = matches!(mutation, Mutation::RunInstance(_));
        state.mutation_log.push(mutation);

        let resource_ids = match state.mutates.pop_front() {
            Some(scripted) => scripted?,
            None if launches => {
                state.launched += 1;
                vec![format!("ins-{}", state.launched)]
            }
            None => Vec::new(),
        };

        Ok(Submission {
            request_id: state.next_request_id(),
            resource_ids,
        })
    }

    async fn describe(
        &self,
        _kind: ResourceKind,
        filter: &Filter,
    ) -> Result<Description, CloudError> {
        let mut state = self.inner.lock();
        state.describe_log.push(filter.clone());

        let scripted = if state.describes.len() > 1 {
            state.describes.pop_front()
        } else {
            state.describes.front().cloned()
        };
        let observations = scripted.unwrap_or_else(|| Ok(Vec::new()))?;

        Ok(Description {
            request_id: state.next_request_id(),
            observations: observations
                .into_iter()
                .filter(|o| filter.matches(o))
                .collect(),
        })
    }
}

impl CloudConnector for ScriptedCloud {
    fn connect(&self, params: &ProviderParams) -> Result<Arc<dyn CloudApi>, CloudError> {
        let mut state = self.inner.lock();
        state.connections.push(params.clone());
        if let Some(err) = &state.connect_error {
            return Err(err.clone());
        }
        Ok(Arc::new(self.clone()))
    }
}
