use crate::config::Config;
use crate::display_servers::DisplayServer;
use crate::errors::Result;
use crate::models::Handle;
use crate::state::State;
use crate::utils::child_process::Children;
use std::marker::PhantomData;
use std::sync::{atomic::AtomicBool, Arc};

/// Maintains current program state.
#[derive(Debug)]
pub struct Manager<H: Handle, C, SERVER: DisplayServer<H>> {
    pub state: State<H>,
    pub config: C,

    pub(crate) children: Children,
    pub(crate) reap_requested: Arc<AtomicBool>,
    pub display_server: SERVER,
    marker: PhantomData<H>,
}

impl<H: Handle, C, SERVER> Manager<H, C, SERVER>
where
    C: Config,
    SERVER: DisplayServer<H>,
{
    /// Connects to the display server and builds the initial state.
    ///
    /// # Errors
    ///
    /// Passes on the display server's start-up failure.
    pub fn new(config: C) -> Result<Self> {
        let display_server = SERVER::new(&config)?;
        let state = State::new(
            &config,
            display_server.screen_size(),
            display_server.font_height(),
        );

        Ok(Self {
            state,
            config,
            children: Children::default(),
            reap_requested: Arc::default(),
            display_server,
            marker: PhantomData,
        })
    }

    pub fn register_child_hook(&self) {
        crate::child_process::register_child_hook(self.reap_requested.clone());
    }
}

#[cfg(test)]
impl
    Manager<
        crate::models::MockHandle,
        crate::config::TestConfig,
        crate::display_servers::MockDisplayServer<crate::models::MockHandle>,
    >
{
    pub fn new_test(tags: Vec<String>) -> Self {
        Self::new_test_with(crate::config::TestConfig {
            tags,
            ..crate::config::TestConfig::default()
        })
    }

    pub fn new_test_with(config: crate::config::TestConfig) -> Self {
        Self::new(config).expect("the mock display server always connects")
    }
}
