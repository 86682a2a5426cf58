use std::time::Duration;

use ureq::Agent;

/// Build a blocking agent with the global timeout.
pub fn new_agent(timeout: Duration) -> Agent {
    Agent::config_builder().timeout_global(Some(timeout)).build().into()
}
