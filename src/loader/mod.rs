//! Script loader.
//!
//! Executes template scripts through a host-supplied [`ScriptEngine`] while
//! keeping the [`LoadContext`] stack in step with what is running:
//!
//! | Operation      | Local script              | Remote script                 |
//! |----------------|---------------------------|-------------------------------|
//! | `load`         | read + execute now        | rejected (`SyncRemote`)       |
//! | `load_async`   | async read + execute      | begin / fetch+execute / end   |
//! | anything else  | `UnknownFile`             | `UnknownFile`                 |
//!
//! Only files declared by the template manifest are ever executed. A file that
//! exists on disk but was never declared is unknown.

mod context;
mod error;
mod remote;

pub use context::LoadContext;
pub use error::LoadError;
pub use remote::{Bracket, FetchFuture, HttpRemote, Phase, RemoteSource, SharedRemote};

use crate::{log, page::StaticFlag, template::MAIN_SCRIPT, utils::path};

/// Executes script source text.
///
/// The engine receives the loader so scripts can load further scripts; such
/// nested loads see the calling file on top of the stack.
pub trait ScriptEngine {
    fn execute(&mut self, loader: &mut ScriptLoader, file: &str, source: &str) -> anyhow::Result<()>;
}

/// Loads declared template scripts into a [`ScriptEngine`].
pub struct ScriptLoader {
    context: LoadContext,
    remote: Option<SharedRemote>,
    rendering: StaticFlag,
}

impl ScriptLoader {
    pub fn new(context: LoadContext) -> Self {
        Self {
            context,
            remote: None,
            rendering: StaticFlag::default(),
        }
    }

    /// Install the source used for remote scripts.
    pub fn with_remote(mut self, remote: SharedRemote) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Share the static-render flag of a page registry.
    pub fn with_static_flag(mut self, flag: StaticFlag) -> Self {
        self.rendering = flag;
        self
    }

    pub fn context(&self) -> &LoadContext {
        &self.context
    }

    /// Whether a page is currently being captured to static output.
    pub fn rendering_to_static(&self) -> bool {
        self.rendering.get()
    }

    fn execute<E>(&mut self, engine: &mut E, file: &str, source: &str) -> Result<(), LoadError>
    where
        E: ScriptEngine + ?Sized,
    {
        self.context.push(file);
        let result = engine.execute(self, file, source);
        self.context.pop();
        result.map_err(LoadError::from_script)
    }

    fn read_local(&self, file: &str) -> Result<String, LoadError> {
        let resolved = self.context.resolve(file);
        std::fs::read_to_string(resolved).map_err(|err| LoadError::Io(file.to_owned(), err))
    }

    /// Load and execute a local script now.
    pub fn load<E>(&mut self, engine: &mut E, file: &str) -> Result<(), LoadError>
    where
        E: ScriptEngine + ?Sized,
    {
        let file = self.context.normalize(file)?;

        if self.context.is_local(&file) {
            let source = self.read_local(&file)?;
            self.execute(engine, &file, &source)
        } else if self.context.is_remote(&file) {
            Err(LoadError::SyncRemote(file))
        } else {
            Err(LoadError::UnknownFile(file))
        }
    }

    /// Load every declared local script in order, stopping at the first
    /// failure.
    pub fn load_all<E>(&mut self, engine: &mut E) -> Result<(), LoadError>
    where
        E: ScriptEngine + ?Sized,
    {
        let scripts = self.context.local().to_vec();
        for script in &scripts {
            self.load(engine, script)?;
        }
        Ok(())
    }

    /// Execute the template's entry script.
    pub fn load_main<E>(&mut self, engine: &mut E) -> Result<(), LoadError>
    where
        E: ScriptEngine + ?Sized,
    {
        let file = self.context.normalize(&path::join("/", MAIN_SCRIPT))?;
        let source = self.read_local(&file)?;
        self.execute(engine, &file, &source)
    }

    /// Load and execute a local or remote script.
    ///
    /// Local scripts complete without suspending. Remote scripts go through
    /// the three-phase [`Bracket`].
    pub async fn load_async<E>(&mut self, engine: &mut E, file: &str) -> Result<(), LoadError>
    where
        E: ScriptEngine + ?Sized,
    {
        let file = self.context.normalize(file)?;

        if self.context.is_local(&file) {
            let resolved = self.context.resolve(&file);
            let source = tokio::fs::read_to_string(resolved)
                .await
                .map_err(|err| LoadError::Io(file.clone(), err))?;
            return self.execute(engine, &file, &source);
        }

        if self.context.is_remote(&file) {
            return self.load_remote(engine, &file).await;
        }

        Err(LoadError::UnknownFile(file))
    }

    async fn load_remote<E>(&mut self, engine: &mut E, url: &str) -> Result<(), LoadError>
    where
        E: ScriptEngine + ?Sized,
    {
        let remote = self
            .remote
            .clone()
            .ok_or_else(|| LoadError::RemoteDisabled(url.to_owned()))?;

        log!("load"; "fetching {url}");
        let mut scope = RemoteScope::begin(self, url);

        let outcome = match remote.fetch(url).await {
            Ok(source) => engine
                .execute(&mut *scope.loader, url, &source)
                .map_err(LoadError::from_script),
            Err(source) => Err(LoadError::Fetch {
                url: url.to_owned(),
                source,
            }),
        };
        scope.settle(outcome);

        scope.end()
    }
}

/// A begun [`Bracket`] bound to its loader.
///
/// Dropping the scope before `end` (the `load_async` future was cancelled
/// mid-fetch) still pops the context.
struct RemoteScope<'a> {
    loader: &'a mut ScriptLoader,
    bracket: Option<Bracket>,
}

impl<'a> RemoteScope<'a> {
    fn begin(loader: &'a mut ScriptLoader, url: &str) -> Self {
        let mut bracket = Bracket::new(url);
        bracket.begin(&mut loader.context);
        Self {
            loader,
            bracket: Some(bracket),
        }
    }

    fn settle(&mut self, outcome: Result<(), LoadError>) {
        if let Some(bracket) = &mut self.bracket {
            bracket.settle(outcome);
        }
    }

    fn end(mut self) -> Result<(), LoadError> {
        match self.bracket.take() {
            Some(bracket) => bracket.end(&mut self.loader.context),
            None => Ok(()),
        }
    }
}

impl Drop for RemoteScope<'_> {
    fn drop(&mut self) {
        if let Some(bracket) = self.bracket.take() {
            log!("load"; "cancelled {}", bracket.url());
            let _ = bracket.end(&mut self.loader.context);
        }
    }
}
