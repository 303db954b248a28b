// HAL - hal-coordination
// Module: deadlock prevention and resolution
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! [`DeadlockEngine`]: static acquire ordering plus dynamic cycle
//! detection and priority-based preemption (spec §4.5 C9).
//!
//! Timestamps are caller-supplied milliseconds rather than a wall clock
//! read internally: every method that needs "now" takes a `now_ms: u64`
//! parameter. The HAL facade sources this from its Time driver. This keeps
//! the engine `no_std`-compatible and makes its cycle-detection and
//! timeout logic fully deterministic under test.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hal_error::{Error, Result};
use hal_sync::Mutex;

use crate::resource::{resource_utils, Priority, ResourceFlags, ResourceType};

/// Default acquisition timeout used by [`ResourceRequest::new`] (matches
/// the original's 5000 ms default).
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Dependencies and waiting requests older than this are dropped by
/// [`DeadlockEngine::cleanup_expired_items`].
pub const MAX_DEPENDENCY_AGE_MS: u64 = 30_000;

/// A request to acquire a resource, pending deadlock-safety checks.
#[derive(Debug, Clone)]
pub struct ResourceRequest {
    /// Id of the requesting driver/component.
    pub requester_id: String,
    /// Resource id being requested.
    pub resource_id: u64,
    /// Type of the requested resource (used for ordering checks).
    pub resource_type: ResourceType,
    /// Request priority.
    pub priority: Priority,
    /// When the request was made, in caller-supplied milliseconds.
    pub request_time_ms: u64,
    /// Maximum time to wait, in milliseconds.
    pub timeout_ms: u64,
    /// Whether exclusive access is required.
    pub exclusive: bool,
}

impl ResourceRequest {
    /// Build a request with the original's defaults: `Normal` priority,
    /// 5000 ms timeout, exclusive access.
    #[must_use]
    pub fn new(requester_id: &str, resource_id: u64, resource_type: ResourceType, now_ms: u64) -> Self {
        Self {
            requester_id: String::from(requester_id),
            resource_id,
            resource_type,
            priority: Priority::Normal,
            request_time_ms: now_ms,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            exclusive: true,
        }
    }
}

#[derive(Debug, Clone)]
struct Dependency {
    from_requester: String,
    to_requester: String,
    resource_id: u64,
    created_time_ms: u64,
}

/// Outcome of [`DeadlockEngine::detect_deadlock`].
#[derive(Debug, Clone, Default)]
pub struct DeadlockInfo {
    /// True iff a cycle was found.
    pub deadlock_detected: bool,
    /// Requester ids participating in the cycle, in traversal order.
    pub cycle_participants: Vec<String>,
    /// Resource ids whose ownership forms an edge of the cycle.
    pub involved_resources: Vec<u64>,
    /// Human-readable `"A -> B -> C"` description of the cycle.
    pub description: String,
}

/// Running counters for the deadlock engine (spec §4.5 supplement).
#[derive(Debug, Clone, Copy, Default)]
pub struct DeadlockStats {
    /// Total acquisition requests handled.
    pub requests_processed: u64,
    /// Requests denied by the static ordering or cycle check.
    pub requests_denied: u64,
    /// Deadlocks found by `detect_deadlock`.
    pub deadlocks_detected: u64,
    /// Deadlocks resolved by `resolve_deadlock`.
    pub deadlocks_resolved: u64,
    /// Waiting requests dropped after their timeout elapsed.
    pub timeouts_occurred: u64,
    /// Resources forcibly released during resolution.
    pub preemptions_performed: u64,
}

struct State {
    owned_resources: BTreeMap<String, Vec<u64>>,
    resource_owners: BTreeMap<u64, String>,
    resource_kinds: BTreeMap<u64, ResourceType>,
    resource_flags: BTreeMap<u64, ResourceFlags>,
    resource_priorities: BTreeMap<u64, Priority>,
    waiting_requests: Vec<ResourceRequest>,
    dependencies: Vec<Dependency>,
    dependency_graph: BTreeMap<String, Vec<String>>,
    resource_orders: BTreeMap<ResourceType, u32>,
    stats: DeadlockStats,
}

/// Static acquire-ordering plus dynamic cycle detection for cross-driver
/// resource locking (spec §4.5 C9).
///
/// The dependency graph is keyed **waiter -> owners it waits on**: an edge
/// `to -> from` means `to` is blocked waiting on a resource `from`
/// currently owns. This direction is what the original's
/// `add_dependency(from, to, handle)` actually builds
/// (`dependency_graph_[to].push_back(from)`), resolving the ambiguity the
/// header comments alone leave open.
pub struct DeadlockEngine {
    state: Mutex<State>,
}

impl Default for DeadlockEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DeadlockEngine {
    /// Build an engine with the default resource ordering
    /// (`ResourceType::default_order`).
    #[must_use]
    pub fn new() -> Self {
        let mut resource_orders = BTreeMap::new();
        for ty in [
            ResourceType::Memory,
            ResourceType::Hardware,
            ResourceType::Performance,
            ResourceType::Communication,
            ResourceType::Platform,
            ResourceType::Custom,
        ] {
            resource_orders.insert(ty, ty.default_order());
        }
        Self {
            state: Mutex::new(State {
                owned_resources: BTreeMap::new(),
                resource_owners: BTreeMap::new(),
                resource_kinds: BTreeMap::new(),
                resource_flags: BTreeMap::new(),
                resource_priorities: BTreeMap::new(),
                waiting_requests: Vec::new(),
                dependencies: Vec::new(),
                dependency_graph: BTreeMap::new(),
                resource_orders,
                stats: DeadlockStats::default(),
            }),
        }
    }

    /// Override the acquire-ordering value for a resource type.
    pub fn register_resource_order(&self, resource_type: ResourceType, order_value: u32) {
        self.state.lock().resource_orders.insert(resource_type, order_value);
    }

    /// Record a resource's type, flags, and priority so later requests for
    /// it can be ordering-checked and preemption-scored. Call this once,
    /// e.g. when a resource is registered with
    /// [`crate::registry::ResourceRegistry`].
    pub fn describe_resource(&self, resource_id: u64, resource_type: ResourceType, priority: Priority, flags: ResourceFlags) {
        let mut state = self.state.lock();
        state.resource_kinds.insert(resource_id, resource_type);
        state.resource_flags.insert(resource_id, flags);
        state.resource_priorities.insert(resource_id, priority);
    }

    fn resource_order_of(state: &State, resource_type: ResourceType) -> u32 {
        *state.resource_orders.get(&resource_type).unwrap_or(&resource_type.default_order())
    }

    fn check_resource_ordering(state: &State, requester_id: &str, new_resource_type: ResourceType) -> bool {
        let Some(owned) = state.owned_resources.get(requester_id) else { return true };
        let new_order = Self::resource_order_of(state, new_resource_type);
        owned.iter().all(|owned_id| {
            let owned_type = state.resource_kinds.get(owned_id).copied().unwrap_or(ResourceType::Custom);
            new_order >= Self::resource_order_of(state, owned_type)
        })
    }

    fn dfs_cycle_detection(
        graph: &BTreeMap<String, Vec<String>>,
        start: &str,
        visited: &mut alloc::collections::BTreeSet<String>,
        recursion_stack: &mut alloc::collections::BTreeSet<String>,
        cycle_path: &mut Vec<String>,
    ) -> bool {
        visited.insert(start.to_string());
        recursion_stack.insert(start.to_string());
        cycle_path.push(start.to_string());

        if let Some(neighbors) = graph.get(start) {
            for neighbor in neighbors {
                if recursion_stack.contains(neighbor) {
                    cycle_path.push(neighbor.clone());
                    return true;
                }
                if !visited.contains(neighbor)
                    && Self::dfs_cycle_detection(graph, neighbor, visited, recursion_stack, cycle_path)
                {
                    return true;
                }
            }
        }

        cycle_path.pop();
        recursion_stack.remove(start);
        false
    }

    /// Would acquiring `resource_id` (of `resource_type`) for `requester_id`
    /// be safe right now? `true` if the requester already owns it, the
    /// static ordering check passes and it's free, or granting it would not
    /// close a cycle in the dependency graph.
    pub fn is_acquisition_safe(&self, requester_id: &str, resource_id: u64, resource_type: ResourceType) -> bool {
        let state = self.state.lock();
        if state.owned_resources.get(requester_id).is_some_and(|v| v.contains(&resource_id)) {
            return true;
        }
        if !Self::check_resource_ordering(&state, requester_id, resource_type) {
            return false;
        }
        let Some(owner) = state.resource_owners.get(&resource_id) else { return true };
        if owner == requester_id {
            return true;
        }

        let mut graph = state.dependency_graph.clone();
        graph.entry(requester_id.to_string()).or_default().push(owner.clone());
        let mut visited = alloc::collections::BTreeSet::new();
        let mut recursion_stack = alloc::collections::BTreeSet::new();
        let mut cycle_path = Vec::new();
        !Self::dfs_cycle_detection(&graph, requester_id, &mut visited, &mut recursion_stack, &mut cycle_path)
    }

    fn add_dependency(state: &mut State, owner: &str, waiter: &str, resource_id: u64, now_ms: u64) {
        state.dependency_graph.entry(waiter.to_string()).or_default().push(owner.to_string());
        state.dependencies.push(Dependency {
            from_requester: owner.to_string(),
            to_requester: waiter.to_string(),
            resource_id,
            created_time_ms: now_ms,
        });
    }

    /// Attempt to acquire `resource_id` for `requester_id`.
    ///
    /// If the resource is free and the acquisition is safe, ownership is
    /// granted and `Ok(())` is returned. If it is already owned by someone
    /// else, the request is queued as waiting, a dependency edge is added,
    /// and this returns a `resource_locked`-style error (the caller is
    /// queued, not denied outright). If the ordering/cycle check fails
    /// outright, this also denies with `resource_locked` and does not queue
    /// anything.
    pub fn request_resource_acquisition(&self, request: &ResourceRequest) -> Result<()> {
        let mut state = self.state.lock();
        state.stats.requests_processed += 1;

        if !Self::check_resource_ordering(&state, &request.requester_id, request.resource_type) {
            state.stats.requests_denied += 1;
            return Err(Error::resource_locked().with_context("resource acquire-order violation"));
        }

        state.resource_kinds.insert(request.resource_id, request.resource_type);

        match state.resource_owners.get(&request.resource_id).cloned() {
            None => {
                state.resource_owners.insert(request.resource_id, request.requester_id.clone());
                state.owned_resources.entry(request.requester_id.clone()).or_default().push(request.resource_id);
                Ok(())
            }
            Some(owner) if owner == request.requester_id => Ok(()),
            Some(owner) => {
                Self::add_dependency(&mut state, &owner, &request.requester_id, request.resource_id, request.request_time_ms);
                state.waiting_requests.push(request.clone());
                Err(Error::resource_locked().with_context("resource currently owned; request queued"))
            }
        }
    }

    /// Release `resource_id` from `requester_id`, then retry every queued
    /// request for that same resource.
    pub fn release_resource(&self, requester_id: &str, resource_id: u64) -> Result<()> {
        {
            let mut state = self.state.lock();
            match state.resource_owners.get(&resource_id) {
                Some(owner) if owner == requester_id => {}
                _ => return Err(Error::configuration_missing().with_context("requester does not own resource")),
            }
            state.resource_owners.remove(&resource_id);
            if let Some(owned) = state.owned_resources.get_mut(requester_id) {
                owned.retain(|&id| id != resource_id);
            }
            state.dependencies.retain(|d| !(d.resource_id == resource_id && d.from_requester == requester_id));
            state.dependency_graph.remove(requester_id);
            for owners in state.dependency_graph.values_mut() {
                owners.retain(|o| o != requester_id);
            }
        }

        let retry_requests: Vec<ResourceRequest> = {
            let mut state = self.state.lock();
            let (matching, rest): (Vec<_>, Vec<_>) =
                state.waiting_requests.drain(..).partition(|r| r.resource_id == resource_id);
            state.waiting_requests = rest;
            matching
        };
        for request in retry_requests {
            let _ = self.request_resource_acquisition(&request);
        }
        Ok(())
    }

    /// Run cycle detection over the current dependency graph.
    pub fn detect_deadlock(&self) -> DeadlockInfo {
        let mut state = self.state.lock();
        let nodes: Vec<String> = state.dependency_graph.keys().cloned().collect();
        for start in &nodes {
            let mut visited = alloc::collections::BTreeSet::new();
            let mut recursion_stack = alloc::collections::BTreeSet::new();
            let mut cycle_path = Vec::new();
            if Self::dfs_cycle_detection(&state.dependency_graph, start, &mut visited, &mut recursion_stack, &mut cycle_path) {
                let involved_resources: Vec<u64> = state
                    .dependencies
                    .iter()
                    .filter(|d| cycle_path.contains(&d.from_requester))
                    .map(|d| d.resource_id)
                    .collect();
                let description = cycle_path.join(" -> ");
                state.stats.deadlocks_detected += 1;
                #[cfg(feature = "std")]
                log::warn!("deadlock detected: {description}");
                return DeadlockInfo {
                    deadlock_detected: true,
                    cycle_participants: cycle_path,
                    involved_resources,
                    description,
                };
            }
        }
        DeadlockInfo::default()
    }

    fn calculate_preemption_priority(state: &State, requester_id: &str, now_ms: u64) -> u32 {
        let Some(owned) = state.owned_resources.get(requester_id) else { return 0 };
        owned
            .iter()
            .map(|resource_id| {
                let priority = state.resource_priorities.get(resource_id).copied().unwrap_or(Priority::Normal);
                let flags = state.resource_flags.get(resource_id).copied().unwrap_or(ResourceFlags::NONE);
                let score = resource_utils::calculate_priority_score(priority, flags);
                let hold_time_ms = state
                    .dependencies
                    .iter()
                    .filter(|d| d.from_requester == requester_id && d.resource_id == *resource_id)
                    .map(|d| now_ms.saturating_sub(d.created_time_ms))
                    .max()
                    .unwrap_or(0);
                let reduction = core::cmp::max(1, hold_time_ms / 100) as u32;
                score.saturating_sub(reduction)
            })
            .sum()
    }

    /// Resolve a detected deadlock by preempting the cycle participant with
    /// the lowest total preemption-priority score: release every resource
    /// it owns, which also retries anyone who was waiting on them.
    pub fn resolve_deadlock(&self, info: &DeadlockInfo, now_ms: u64) -> Result<()> {
        if !info.deadlock_detected || info.cycle_participants.is_empty() {
            return Ok(());
        }

        let victim = {
            let state = self.state.lock();
            info.cycle_participants
                .iter()
                .min_by_key(|requester_id| Self::calculate_preemption_priority(&state, requester_id, now_ms))
                .cloned()
        };
        let Some(victim) = victim else { return Ok(()) };

        #[cfg(feature = "std")]
        log::info!("resolving deadlock by preempting {victim}");
        let owned: Vec<u64> = self.state.lock().owned_resources.get(&victim).cloned().unwrap_or_default();
        for resource_id in owned {
            self.release_resource(&victim, resource_id)?;
            self.state.lock().stats.preemptions_performed += 1;
        }
        self.state.lock().stats.deadlocks_resolved += 1;
        Ok(())
    }

    /// Drop waiting requests whose timeout has elapsed and dependencies
    /// older than [`MAX_DEPENDENCY_AGE_MS`]. Returns the number removed.
    pub fn cleanup_expired_items(&self, now_ms: u64) -> usize {
        let mut state = self.state.lock();
        let before_requests = state.waiting_requests.len();
        state.waiting_requests.retain(|r| now_ms < r.request_time_ms + r.timeout_ms);
        let timed_out = before_requests - state.waiting_requests.len();
        state.stats.timeouts_occurred += timed_out as u64;

        let before_deps = state.dependencies.len();
        state.dependencies.retain(|d| now_ms.saturating_sub(d.created_time_ms) < MAX_DEPENDENCY_AGE_MS);
        let dropped_deps = before_deps - state.dependencies.len();

        timed_out + dropped_deps
    }

    /// Snapshot of the running counters.
    #[must_use]
    pub fn stats(&self) -> DeadlockStats {
        self.state.lock().stats
    }

    /// Reset every counter to zero.
    pub fn clear_stats(&self) {
        self.state.lock().stats = DeadlockStats::default();
    }

    /// Resource ids currently owned by `requester_id`.
    #[must_use]
    pub fn owned_resources(&self, requester_id: &str) -> Vec<u64> {
        self.state.lock().owned_resources.get(requester_id).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(id: &str, resource: u64, ty: ResourceType, now_ms: u64) -> ResourceRequest {
        ResourceRequest::new(id, resource, ty, now_ms)
    }

    #[test]
    fn free_resource_is_granted_immediately() {
        let engine = DeadlockEngine::new();
        let r = req("driver-a", 1, ResourceType::Memory, 0);
        assert!(engine.request_resource_acquisition(&r).is_ok());
        assert_eq!(engine.owned_resources("driver-a"), alloc::vec![1]);
    }

    #[test]
    fn owned_resource_is_queued_not_denied_outright() {
        let engine = DeadlockEngine::new();
        engine.request_resource_acquisition(&req("a", 1, ResourceType::Memory, 0)).unwrap();
        let err = engine.request_resource_acquisition(&req("b", 1, ResourceType::Memory, 0)).unwrap_err();
        assert_eq!(err, Error::resource_locked());
    }

    #[test]
    fn release_retries_waiting_requests() {
        let engine = DeadlockEngine::new();
        engine.request_resource_acquisition(&req("a", 1, ResourceType::Memory, 0)).unwrap();
        engine.request_resource_acquisition(&req("b", 1, ResourceType::Memory, 0)).unwrap_err();
        engine.release_resource("a", 1).unwrap();
        assert_eq!(engine.owned_resources("b"), alloc::vec![1]);
        assert!(engine.owned_resources("a").is_empty());
    }

    #[test]
    fn acquire_order_violation_is_denied() {
        let engine = DeadlockEngine::new();
        // Hardware (order 200) acquired before Memory (order 100) by the
        // same requester violates ascending-order acquisition.
        engine.request_resource_acquisition(&req("a", 1, ResourceType::Hardware, 0)).unwrap();
        let err = engine.request_resource_acquisition(&req("a", 2, ResourceType::Memory, 0)).unwrap_err();
        assert_eq!(err, Error::resource_locked());
    }

    #[test]
    fn two_cycle_deadlock_is_detected_and_resolved() {
        let engine = DeadlockEngine::new();
        engine.request_resource_acquisition(&req("a", 1, ResourceType::Memory, 0)).unwrap();
        engine.request_resource_acquisition(&req("b", 2, ResourceType::Memory, 0)).unwrap();
        // a waits on b's resource, b waits on a's resource: a<->b cycle.
        engine.request_resource_acquisition(&req("a", 2, ResourceType::Memory, 0)).unwrap_err();
        engine.request_resource_acquisition(&req("b", 1, ResourceType::Memory, 0)).unwrap_err();

        let info = engine.detect_deadlock();
        assert!(info.deadlock_detected);
        assert!(info.cycle_participants.contains(&String::from("a")));
        assert!(info.cycle_participants.contains(&String::from("b")));

        engine.resolve_deadlock(&info, 1_000).unwrap();
        assert_eq!(engine.stats().deadlocks_resolved, 1);
        assert!(engine.stats().preemptions_performed >= 1);
    }

    #[test]
    fn cleanup_drops_timed_out_waiting_requests() {
        let engine = DeadlockEngine::new();
        engine.request_resource_acquisition(&req("a", 1, ResourceType::Memory, 0)).unwrap();
        engine.request_resource_acquisition(&req("b", 1, ResourceType::Memory, 0)).unwrap_err();
        let removed = engine.cleanup_expired_items(10_000);
        assert!(removed >= 1);
        assert_eq!(engine.stats().timeouts_occurred, 1);
    }
}
