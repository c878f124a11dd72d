use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::ports::{Gcloud, GcloudError};

/// Leading positional arguments of a gcloud call, e.g.
/// `iam workload-identity-pools describe my-pool`.
pub fn route(args: &[String]) -> String {
    args.iter().take_while(|arg| !arg.starts_with("--")).cloned().collect::<Vec<_>>().join(" ")
}

/// In-memory gcloud that records every call.
///
/// Creating a resource makes its describe probe succeed afterwards, so
/// repeated create flows observe the first creation.
#[derive(Default)]
pub struct FakeGcloud {
    listings: Mutex<HashMap<String, Vec<String>>>,
    failing_listings: Mutex<HashSet<String>>,
    existing: Mutex<HashSet<String>>,
    failing_mutations: Mutex<HashSet<String>>,
    pub calls: Mutex<Vec<Vec<String>>>,
    pub mutations: Mutex<Vec<Vec<String>>>,
}

impl FakeGcloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing(self, route: &str, lines: &[&str]) -> Self {
        self.listings
            .lock()
            .unwrap()
            .insert(route.to_string(), lines.iter().map(|l| l.to_string()).collect());
        self
    }

    pub fn with_failing_listing(self, route: &str) -> Self {
        self.failing_listings.lock().unwrap().insert(route.to_string());
        self
    }

    /// Make `route` (a describe probe) report an existing resource.
    pub fn with_existing(self, route: &str) -> Self {
        self.existing.lock().unwrap().insert(route.to_string());
        self
    }

    pub fn with_failing_mutation(self, route: &str) -> Self {
        self.failing_mutations.lock().unwrap().insert(route.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutations(&self) -> Vec<Vec<String>> {
        self.mutations.lock().unwrap().clone()
    }

    /// Routes of every mutating call, in order.
    pub fn mutation_routes(&self) -> Vec<String> {
        self.mutations().iter().map(|args| route(args)).collect()
    }

    fn record(&self, args: &[String]) -> String {
        self.calls.lock().unwrap().push(args.to_vec());
        route(args)
    }
}

impl Gcloud for FakeGcloud {
    fn list(&self, args: &[String]) -> Result<Vec<String>, GcloudError> {
        let route = self.record(args);
        if self.failing_listings.lock().unwrap().contains(&route) {
            return Err(GcloudError::Failed { status: Some(1), stderr: "listing failed".into() });
        }
        if let Some(lines) = self.listings.lock().unwrap().get(&route) {
            return Ok(lines.clone());
        }
        if route.starts_with("projects describe ") {
            return Ok(vec!["123456789".to_string()]);
        }
        Ok(Vec::new())
    }

    fn probe(&self, args: &[String]) -> bool {
        let route = self.record(args);
        self.existing.lock().unwrap().contains(&route)
    }

    fn mutate(&self, args: &[String]) -> Result<(), GcloudError> {
        let route = self.record(args);
        self.mutations.lock().unwrap().push(args.to_vec());
        if self.failing_mutations.lock().unwrap().contains(&route) {
            return Err(GcloudError::Failed { status: Some(1), stderr: "mutation failed".into() });
        }

        let created = route.replace(" create-oidc ", " describe ").replace(" create ", " describe ");
        if created != route {
            self.existing.lock().unwrap().insert(created);
        }
        Ok(())
    }
}
