use crate::api::client::ArtworksClient;
use crate::cli::browse::BrowseSession;
use crate::cli::main_types::{Commands, ConfigCommands};
use crate::core::accumulator::{AccumulationOutcome, SelectCountResult, SelectionAccumulator};
use crate::core::controller::TableController;
use crate::core::page_loader::{PageLoader, PageState};
use crate::core::selection::Selection;
use crate::core::source::PAGE_SIZE;
use crate::display::{OperationStatus, PaginationInfo, ProgressSpinner, TableDisplay, display_status};
use crate::error::{AppError, CliError};
use crate::storage::config::Config;
use crate::utils::logging::print_verbose;
use crate::utils::validation::{page_number_to_index, validate_url};
use std::path::PathBuf;
use std::sync::Arc;

pub struct Dispatcher {
    config: Config,
    config_path: Option<PathBuf>,
    base_url_override: Option<String>,
    no_color: bool,
    verbose: bool,
}

impl Dispatcher {
    fn log_verbose(&self, msg: &str) {
        print_verbose(self.verbose, msg);
    }

    pub fn new(config: Config, config_path: Option<PathBuf>, verbose: bool) -> Self {
        Self {
            config,
            config_path,
            base_url_override: None,
            no_color: false,
            verbose,
        }
    }

    /// Base URL from `--base-url` or the environment; wins over the config file
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        self.base_url_override = base_url;
        self
    }

    pub fn with_no_color(mut self, no_color: bool) -> Self {
        self.no_color = no_color;
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url_override
            .as_deref()
            .unwrap_or_else(|| self.config.effective_base_url())
    }

    fn client(&self) -> Result<ArtworksClient, AppError> {
        let base_url = self.base_url();
        validate_url(base_url)?;
        self.log_verbose(&format!(
            "Using API at {} (timeout {}s)",
            base_url,
            self.config.effective_timeout()
        ));
        Ok(ArtworksClient::with_timeout(
            base_url.to_string(),
            self.config.effective_timeout(),
        )?)
    }

    fn table_display(&self) -> TableDisplay {
        TableDisplay::new().with_colors(!self.no_color && self.config.effective_colors())
    }

    pub async fn dispatch(&self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Page { page } => self.handle_page_command(page).await,
            Commands::Select { count, page } => self.handle_select_command(&count, page).await,
            Commands::Browse { page } => self.handle_browse_command(page).await,
            Commands::Config { command } => self.handle_config_command(command),
        }
    }

    async fn handle_page_command(&self, page_number: usize) -> Result<(), AppError> {
        self.log_verbose(&format!("Attempting page command - page: {}", page_number));
        let page_index = page_number_to_index(page_number)?;
        let client = self.client()?;
        let mut loader = PageLoader::new(&client);

        let state = load_with_spinner(&mut loader, page_index).await?;
        println!("{}", self.table_display().render_page(&state.records, &Selection::new())?);
        println!("{}", page_summary(state)?);
        Ok(())
    }

    async fn handle_select_command(&self, count: &str, page_number: usize) -> Result<(), AppError> {
        self.log_verbose(&format!(
            "Attempting select command - count: {}, page: {}",
            count, page_number
        ));
        let page_index = page_number_to_index(page_number)?;
        let client = self.client()?;
        let mut loader = PageLoader::new(&client);
        let state = load_with_spinner(&mut loader, page_index).await?.clone();

        let accumulator = SelectionAccumulator::new(&client, PAGE_SIZE);
        let mut spinner = ProgressSpinner::new("Selecting artworks...");
        spinner.start();
        let result = accumulator.select_count(&state, count).await;
        spinner.stop(None);

        let display = self.table_display();
        match result {
            SelectCountResult::Invalid => Err(CliError::InvalidArguments(format!(
                "'{}' is not a positive number of rows",
                count
            ))
            .into()),
            SelectCountResult::Immediate(selection) => {
                println!("{}", display.render_selection(&selection)?);
                display_status(
                    &format!("{} rows selected from page {}", selection.len(), page_number),
                    OperationStatus::Success,
                );
                Ok(())
            }
            SelectCountResult::Fetched(accumulation) => {
                let pages_fetched = accumulation.pages_fetched;
                let outcome = accumulation.outcome.clone();
                let selection = accumulation.into_selection();
                println!("{}", display.render_selection(&selection)?);

                match outcome {
                    AccumulationOutcome::Complete => display_status(
                        &format!(
                            "{} rows selected, {} more page(s) fetched",
                            selection.len(),
                            pages_fetched
                        ),
                        OperationStatus::Success,
                    ),
                    AccumulationOutcome::Exhausted => display_status(
                        &format!("{} rows selected, no more artworks available", selection.len()),
                        OperationStatus::Warning,
                    ),
                    AccumulationOutcome::Aborted(e) => display_status(
                        &format!("{} rows selected before a fetch failed: {}", selection.len(), e),
                        OperationStatus::Warning,
                    ),
                }
                Ok(())
            }
        }
    }

    async fn handle_browse_command(&self, page_number: usize) -> Result<(), AppError> {
        self.log_verbose(&format!("Attempting browse command - page: {}", page_number));
        let page_index = page_number_to_index(page_number)?;
        let client = self.client()?;

        let handle = TableController::spawn(Arc::new(client), page_index);
        let session = BrowseSession::new(handle.clone(), self.table_display());
        let result = session.run().await;
        handle.shutdown();
        result
    }

    fn handle_config_command(&self, command: ConfigCommands) -> Result<(), AppError> {
        match command {
            ConfigCommands::Show => {
                self.log_verbose("Attempting config show command");
                println!("{}", self.render_config());
                Ok(())
            }
            ConfigCommands::Set { key, value } => {
                self.log_verbose(&format!(
                    "Attempting config set - key: {}, value: {}",
                    key, value
                ));
                let mut config = self.config.clone();
                config.set_field(&key, &value)?;
                config.save(self.config_path.clone())?;
                println!("✅ Set {} = {}", key, value);
                Ok(())
            }
        }
    }

    fn render_config(&self) -> String {
        let path = match &self.config_path {
            Some(path) => path.display().to_string(),
            None => Config::config_file_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(no config directory)".to_string()),
        };

        let mut out = String::new();
        out.push_str("Current Configuration:\n");
        out.push_str("=====================\n");
        out.push_str(&format!("Config file: {}\n", path));
        out.push_str(&format!(
            "base_url: {}{}\n",
            self.config.effective_base_url(),
            if self.config.base_url.is_none() { " (default)" } else { "" }
        ));
        out.push_str(&format!(
            "timeout_seconds: {}{}\n",
            self.config.effective_timeout(),
            if self.config.timeout_seconds.is_none() { " (default)" } else { "" }
        ));
        out.push_str(&format!(
            "use_colors: {}{}",
            self.config.effective_colors(),
            if self.config.use_colors.is_none() { " (default)" } else { "" }
        ));
        if let Some(url) = &self.base_url_override {
            out.push_str(&format!("\nbase_url override: {}", url));
        }
        out
    }
}

async fn load_with_spinner<'l>(
    loader: &'l mut PageLoader<'_>,
    page_index: usize,
) -> Result<&'l PageState, AppError> {
    let mut spinner = ProgressSpinner::new(format!("Fetching page {}...", page_index + 1));
    spinner.start();
    let result = loader.load(page_index).await;
    spinner.stop(None);
    Ok(result?)
}

fn page_summary(state: &PageState) -> Result<String, AppError> {
    let info = PaginationInfo::new(state.page_index, PAGE_SIZE, state.total_records, state.len())?;
    Ok(info.summary())
}
