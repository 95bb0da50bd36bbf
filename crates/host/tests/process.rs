//! `Host::process` end to end, with the VM plugin on a scripted cloud and
//! with purpose-built fake plugins.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use stratus_action::prelude::*;
use stratus_cloud::Observation;
use stratus_cloud::testing::{ScriptedCloud, instance};
use stratus_host::{Host, HostConfig, PluginRequest, PluginResponse, ResultCode, default_registry};
use stratus_plugin::{PluginKey, PluginRegistry, StaticPlugin};
use tokio_util::sync::CancellationToken;

fn vm_host(cloud: &ScriptedCloud) -> Host {
    Host::new(Arc::new(default_registry(
        Arc::new(cloud.clone()),
        &HostConfig::default(),
    )))
}

#[tokio::test(start_paused = true)]
async fn create_scenario() {
    let cloud = ScriptedCloud::new().describe_returns(vec![Observation {
        id: "ins-1".into(),
        state: "RUNNING".into(),
        cpu: 2,
        memory: 4096,
        private_ips: vec!["10.0.0.5".into()],
        ..Observation::default()
    }]);

    let response = vm_host(&cloud)
        .process(PluginRequest::new(
            "vm",
            "create",
            json!({
                "inputs": [{
                    "guid": "g1",
                    "image_id": "img-1",
                    "instance_type": "S1",
                    "system_disk_size": 50
                }]
            }),
        ))
        .await;

    assert_eq!(response.result_code, ResultCode::Success);
    assert_eq!(response.result_message, "success");
    let results = response.results.unwrap();
    let outputs = results["outputs"].as_array().unwrap();
    assert_eq!(outputs.len(), 1);
    let output = &outputs[0];
    assert_eq!(output["guid"], "g1");
    assert_eq!(output["instance_state"], "RUNNING");
    assert_eq!(output["cpu"], "2");
    assert_eq!(output["memory"], "4096");
    assert_eq!(output["instance_private_ip"], "10.0.0.5");
    assert!(output["password"].as_str().is_some_and(|p| !p.is_empty()));
}

#[tokio::test(start_paused = true)]
async fn existing_instance_scenario() {
    let cloud = ScriptedCloud::new().describe_returns(vec![instance("ins-9", "STOPPED")]);

    let response = vm_host(&cloud)
        .process(PluginRequest::new(
            "vm",
            "create",
            json!({"inputs": [{"guid": "g1", "instance_id": "ins-9", "image_id": "img-1", "instance_type": "S1"}]}),
        ))
        .await;

    assert!(response.is_success(), "{response:?}");
    assert_eq!(cloud.mutation_count(), 0);
    assert_eq!(
        response.results,
        Some(json!({
            "outputs": [{
                "guid": "g1",
                "request_id": "req-1",
                "id": "ins-9",
                "cpu": "2",
                "memory": "4",
                "instance_state": "STOPPED",
                "instance_private_ip": "10.0.0.8"
            }]
        }))
    );
}

#[tokio::test(start_paused = true)]
async fn outputs_follow_input_order() {
    let cloud = ScriptedCloud::new();
    let inputs: Vec<Value> = ["ins-3", "ins-1", "ins-2"]
        .iter()
        .enumerate()
        .map(|(i, id)| json!({"guid": format!("g{i}"), "id": id}))
        .collect();

    let response = vm_host(&cloud)
        .process(PluginRequest::new("vm", "stop", json!({"inputs": inputs})))
        .await;

    let results = response.results.unwrap();
    let ids: Vec<&str> = results["outputs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["ins-3", "ins-1", "ins-2"]);
}

#[tokio::test(start_paused = true)]
async fn terminate_scenarios() {
    let cloud = ScriptedCloud::new()
        .describe_returns_times(vec![instance("ins-1", "SHUTTING-DOWN")], 3)
        .describe_returns(vec![]);
    let request = PluginRequest::new("vm", "terminate", json!({"inputs": [{"guid": "g1", "id": "ins-1"}]}));

    let response = vm_host(&cloud).process(request.clone()).await;
    assert!(response.is_success(), "{response:?}");
    assert_eq!(cloud.describe_count(), 4);

    let stuck = ScriptedCloud::new().describe_returns(vec![instance("ins-1", "RUNNING")]);
    let started = tokio::time::Instant::now();
    let response = vm_host(&stuck).process(request).await;
    assert_eq!(response.result_code, ResultCode::Failure);
    assert!(
        response.result_message.starts_with("wait timeout: instance `ins-1` not absent"),
        "{}",
        response.result_message
    );
    assert_eq!(response.results, None);
    assert_eq!(started.elapsed(), Duration::from_secs(605));
}

#[tokio::test]
async fn unknown_plugin_fails_without_remote_calls() {
    let cloud = ScriptedCloud::new();

    let response = vm_host(&cloud)
        .process(PluginRequest::new("storage", "create", json!({"inputs": [{"guid": "g1"}]})))
        .await;

    assert_eq!(
        response,
        PluginResponse {
            result_code: ResultCode::Failure,
            result_message: "plugin `storage` not found".into(),
            results: None,
        }
    );
    assert!(cloud.connections().is_empty());
    assert_eq!(cloud.mutation_count() + cloud.describe_count(), 0);
}

#[tokio::test]
async fn names_resolve_exactly() {
    let cloud = ScriptedCloud::new();
    let host = vm_host(&cloud);
    let params = json!({"inputs": [{"guid": "g1", "id": "ins-1"}]});

    for (plugin, action, message) in [
        ("VM", "start", "plugin `VM` not found"),
        (" vm ", "stop", "plugin ` vm ` not found"),
        ("vm", "START", "plugin `vm`: action `START` not found"),
        ("vm", "Stop", "plugin `vm`: action `Stop` not found"),
    ] {
        let response = host
            .process(PluginRequest::new(plugin, action, params.clone()))
            .await;
        assert_eq!(response.result_code, ResultCode::Failure);
        assert_eq!(response.result_message, message);
        assert_eq!(response.results, None);
    }
    assert!(cloud.connections().is_empty());
    assert_eq!(cloud.mutation_count() + cloud.describe_count(), 0);
}

#[tokio::test]
async fn unknown_action_fails() {
    let cloud = ScriptedCloud::new();

    let response = vm_host(&cloud)
        .process(PluginRequest::new("vm", "reboot", json!({})))
        .await;

    assert_eq!(response.result_code, ResultCode::Failure);
    assert_eq!(response.result_message, "plugin `vm`: action `reboot` not found");
}

#[tokio::test]
async fn malformed_payload_fails_at_decode() {
    let cloud = ScriptedCloud::new();

    let response = vm_host(&cloud)
        .process(PluginRequest::new("vm", "create", json!(["not", "an", "object"])))
        .await;

    assert_eq!(response.result_code, ResultCode::Failure);
    assert!(response.result_message.starts_with("decode parameters:"));
    assert!(cloud.connections().is_empty());
}

#[tokio::test]
async fn invalid_vm_input_never_reaches_the_cloud() {
    let cloud = ScriptedCloud::new();

    let response = vm_host(&cloud)
        .process(PluginRequest::new(
            "vm",
            "bind-security-groups",
            json!({"inputs": [{"guid": "g1", "provider_params": "Region=r", "instance_id": "ins-1"}]}),
        ))
        .await;

    assert_eq!(
        response.result_message,
        "invalid parameters: input security_group_ids is empty"
    );
    assert!(cloud.connections().is_empty());
}

#[tokio::test(start_paused = true)]
async fn cancellation_aborts_the_wait() {
    let cloud = ScriptedCloud::new().describe_returns(vec![instance("ins-1", "RUNNING")]);
    let host = vm_host(&cloud);
    let token = CancellationToken::new();

    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(12)).await;
        canceller.cancel();
    });
    let response = host
        .process_with_cancel(
            PluginRequest::new("vm", "terminate", json!({"inputs": [{"guid": "g1", "id": "ins-1"}]})),
            token,
        )
        .await;

    assert_eq!(response.result_message, "cancelled");
    assert_eq!(cloud.describe_count(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_are_independent() {
    let cloud = ScriptedCloud::new();
    let host = vm_host(&cloud);

    let tasks: Vec<_> = (0..16)
        .map(|i| {
            let host = host.clone();
            tokio::spawn(async move {
                host.process(PluginRequest::new(
                    "vm",
                    "start",
                    json!({"inputs": [{"guid": format!("g{i}"), "id": format!("ins-{i}")}]}),
                ))
                .await
            })
        })
        .collect();

    for (i, task) in tasks.into_iter().enumerate() {
        let response = task.await.unwrap();
        let results = response.results.unwrap();
        assert_eq!(results["outputs"][0]["guid"], format!("g{i}"));
    }
    assert_eq!(cloud.mutation_count(), 16);
}

// Fake plugin: counts executions, and panics on demand.

struct Probe {
    meta: ActionMetadata,
    executions: Arc<AtomicUsize>,
}

#[async_trait]
impl Action for Probe {
    type Input = Value;
    type Output = Value;

    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    fn check_param(&self, input: &Value) -> Result<(), ActionError> {
        if input.get("valid") == Some(&Value::Bool(true)) {
            Ok(())
        } else {
            Err(ActionError::invalid("input valid is not set"))
        }
    }

    async fn execute(&self, input: Value, _ctx: &ActionContext) -> Result<Value, ActionError> {
        self.executions.fetch_add(1, Ordering::SeqCst);
        if input.get("panic").is_some() {
            panic!("boom");
        }
        Ok(input)
    }
}

fn probe_host() -> (Host, Arc<AtomicUsize>) {
    let executions = Arc::new(AtomicUsize::new(0));
    let registry = PluginRegistry::new();
    registry.register(Arc::new(StaticPlugin::new(
        PluginKey::from_static("probe"),
        ActionRegistry::builder()
            .action(Probe {
                meta: ActionMetadata::new(ActionKey::from_static("run"), "Counts executions"),
                executions: Arc::clone(&executions),
            })
            .build(),
    )));
    (Host::new(Arc::new(registry)), executions)
}

#[tokio::test]
async fn failed_check_never_executes() {
    let (host, executions) = probe_host();

    let response = host
        .process(PluginRequest::new("probe", "run", json!({"valid": false})))
        .await;
    assert_eq!(response.result_message, "invalid parameters: input valid is not set");
    assert_eq!(executions.load(Ordering::SeqCst), 0);

    let response = host
        .process(PluginRequest::new("probe", "run", json!({"valid": true})))
        .await;
    assert_eq!(response.results, Some(json!({"valid": true})));
    assert_eq!(executions.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn panics_become_failure_responses() {
    let (host, executions) = probe_host();

    let response = host
        .process(PluginRequest::new("probe", "run", json!({"valid": true, "panic": 1})))
        .await;

    assert_eq!(
        response,
        PluginResponse {
            result_code: ResultCode::Failure,
            result_message: "action panicked: boom".into(),
            results: None,
        }
    );
    assert_eq!(executions.load(Ordering::SeqCst), 1);

    let response = host
        .process(PluginRequest::new("probe", "run", json!({"valid": true})))
        .await;
    assert!(response.is_success());
}
