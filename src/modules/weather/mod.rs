//! Module that provides current weather conditions and forecasts for a place, postcode or
//! coordinates, using Google Maps and OpenWeather for geocoding and OpenWeather for the weather.

#![deny(unsafe_code)]
#![deny(missing_docs)]

extern crate async_trait;

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    BotCommand,
    BotCommandResult,
    BotConfig,
    BotParameters,
    BotResponse,
    LookupError,
    http,
    util::format::bold,
};

mod cache;
mod colour;
mod dms;
mod fetch;
mod format;
mod geocode;
mod icons;
mod model;
mod postal;
mod store;

use self::cache::ResponseCache;
use self::fetch::WeatherFetcher;
use self::geocode::{Geocoder, LocationQuery};
use self::postal::PostalDataset;
use self::store::{LocationStore, PendingWrite};

static GOOGLE_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
static OPENWEATHER_GEO_URL: &str = "https://api.openweathermap.org/geo/1.0";
static OPENWEATHER_ONECALL_URL: &str = "https://api.openweathermap.org/data/3.0/onecall";

/// The file, relative to the data directory, that stores the users' default locations.
pub static LOCATIONS_FILE: &str = "weather.json";

/**
 * The provider URLs the weather commands talk to.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    /// Google Maps geocoding, `.../maps/api/geocode/json`.
    pub google_geocode: String,
    /// OpenWeather geocoding base URL; `/direct`, `/reverse` and `/zip` are appended.
    pub openweather_geo: String,
    /// OpenWeather One Call, `.../data/3.0/onecall`.
    pub openweather_onecall: String,
}

impl Default for Endpoints {
    fn default() -> Endpoints {
        Endpoints {
            google_geocode: GOOGLE_GEOCODE_URL.to_string(),
            openweather_geo: OPENWEATHER_GEO_URL.to_string(),
            openweather_onecall: OPENWEATHER_ONECALL_URL.to_string(),
        }
    }
}

impl Endpoints {
    /**
     * All endpoints on one server, using the providers' paths. Useful for testing against a mock
     * server.
     */
    pub fn with_base(base: &str) -> Endpoints {
        let base = base.trim_end_matches('/');
        Endpoints {
            google_geocode: format!("{}/maps/api/geocode/json", base),
            openweather_geo: format!("{}/geo/1.0", base),
            openweather_onecall: format!("{}/data/3.0/onecall", base),
        }
    }
}

/**
 * Options accepted by the weather command.
 */
#[derive(Debug, Default, PartialEq)]
pub struct WeatherRequest {
    /// Show the daily forecast instead of the current conditions.
    pub forecast: bool,
    /// Use the default location of this nickname instead of the caller's.
    pub user: Option<String>,
    /// The location to look up, if given.
    pub location: Option<String>,
}

impl WeatherRequest {
    /**
     * Parse `[--forecast] [--user <nick>] [<location>]`. Options must come before the location.
     */
    pub fn parse(args: &[String]) -> Result<WeatherRequest, LookupError> {
        let mut request = WeatherRequest::default();
        let mut args = args.iter();
        let mut rest = Vec::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--forecast" =>
                    request.forecast = true,
                "--user" =>
                    match args.next() {
                        Some(nick) => request.user = Some(nick.to_string()),
                        None => return Err(LookupError::MalformedInput("--user needs a nickname".to_string())),
                    },
                option if option.starts_with("--") =>
                    return Err(LookupError::MalformedInput(format!("Unknown option {}", option))),
                _ => {
                    rest.push(arg.as_str());
                    rest.extend(args.by_ref().map(String::as_str));
                    break;
                },
            }
        }

        if !rest.is_empty() {
            request.location = Some(rest.join(" "));
        }
        Ok(request)
    }
}

/**
 * The weather lookup pipeline plus the users' default locations. Shared by all weather commands.
 */
pub struct WeatherService {
    config: BotConfig,
    openweather_key: Option<String>,
    geocoder: Geocoder,
    fetcher: WeatherFetcher,
    locations: Mutex<LocationStore>,
    writer: tokio::sync::Mutex<()>,
}

impl WeatherService {
    /**
     * Create the service talking to the real providers.
     */
    pub fn new(config: &BotConfig) -> WeatherService {
        WeatherService::with_endpoints(config, Endpoints::default())
    }

    /**
     * Create the service talking to the given endpoints. Loads the default locations from the
     * data directory and the postcode dataset, if one is configured.
     */
    pub fn with_endpoints(config: &BotConfig, endpoints: Endpoints) -> WeatherService {
        let openweather_key = config.api_key("openweather_api_key");
        let google_key = config.api_key("googlemaps_api_key");

        let postal = config.option("postal_dataset").and_then(|path| {
            match PostalDataset::load(Path::new(path)) {
                Ok(dataset) =>
                    Some(dataset),
                Err(err) => {
                    warn!("Unable to load postcode dataset {}: {}", path, err);
                    None
                },
            }
        });

        let client = http::REQWEST.clone();
        let fetcher = WeatherFetcher::new(
            client.clone(),
            endpoints.openweather_onecall.clone(),
            openweather_key.clone());
        let geocoder = Geocoder::new(
            client,
            endpoints,
            google_key,
            openweather_key.clone(),
            postal,
            Arc::new(ResponseCache::default()));

        WeatherService {
            config: config.clone(),
            openweather_key,
            geocoder,
            fetcher,
            locations: Mutex::new(LocationStore::load(&config.data_dir.join(LOCATIONS_FILE))),
            writer: tokio::sync::Mutex::new(()),
        }
    }

    /**
     * The default location stored for the given identity.
     */
    pub fn location_of(&self, identity: &str) -> Option<String> {
        self.locations.lock().get(identity).map(str::to_string)
    }

    /**
     * Store a default location for the given identity and write the database.
     */
    pub async fn set_location(&self, identity: &str, location: &str) -> std::io::Result<()> {
        let _writing = self.writer.lock().await;
        let pending = {
            let mut locations = self.locations.lock();
            locations.set(identity, location);
            locations.pending_write()?
        };
        commit(pending).await
    }

    /**
     * Remove the default location of the given identity and write the database. Returns whether
     * there was one.
     */
    pub async fn unset_location(&self, identity: &str) -> std::io::Result<bool> {
        let _writing = self.writer.lock().await;
        let pending = {
            let mut locations = self.locations.lock();
            if !locations.unset(identity) {
                return Ok(false);
            }
            locations.pending_write()?
        };
        commit(pending).await?;
        Ok(true)
    }

    /**
     * Write the default locations to disk.
     */
    pub fn flush(&self) -> std::io::Result<()> {
        self.locations.lock().flush()
    }

    fn default_location(&self, request: &WeatherRequest, params: &BotParameters) -> Result<String, LookupError> {
        let identity = match request.user {
            Some(ref nick) =>
                params.hostmasks.lookup(nick).ok_or_else(|| LookupError::NotFound(format!(
                    "I have not seen {} yet, so I don't know their location.", nick)))?,
            None =>
                params.identity().map_err(|err| LookupError::NotFound(err.to_string()))?,
        };

        self.location_of(&identity).ok_or_else(|| LookupError::NotFound(format!(
            "No location for {} is set. Use the 'set' command to set a location for your current \
             hostmask, or call 'weather' with <location> as an argument.",
            bold(&format!("*!{}", identity)))))
    }

    /**
     * Run the whole pipeline for one weather request and return the reply line.
     */
    pub async fn weather(&self, request: &WeatherRequest, params: &BotParameters) -> Result<String, LookupError> {
        if self.openweather_key.is_none() {
            return Err(LookupError::missing_key("OpenWeather", "openweather_api_key"));
        }

        let location = match request.location {
            Some(ref location) => location.clone(),
            None => self.default_location(request, params)?,
        };

        let query = LocationQuery::classify(&location)?;
        let place = self.geocoder.resolve(&query).await?;
        let payload = self.fetcher.fetch(place.latitude, place.longitude, request.forecast).await?;

        Ok(if request.forecast {
            format::format_forecast(&place.display_name, &payload.daily)
        } else {
            format::format_current(&place.display_name, &payload)
        })
    }

    /**
     * Look a location up with Google Maps only and describe what it resolved to.
     */
    pub async fn google(&self, location: &str) -> Result<String, LookupError> {
        let place = geocode::validate(self.geocoder.google(location).await?)?;
        Ok(format!("From Google Maps: {} {} [ID: {}] {} {}",
            bold(&place.display_name),
            bold(place.postal_code.as_deref().unwrap_or("-")),
            place.provider_id.as_deref().unwrap_or("-"),
            bold(&place.latitude.to_string()),
            bold(&place.longitude.to_string())))
    }
}

// File writes go to the blocking pool; `writer` keeps them in the order the snapshots were taken.
async fn commit(pending: Option<PendingWrite>) -> std::io::Result<()> {
    match pending {
        Some(pending) =>
            tokio::task::spawn_blocking(move || pending.commit())
                .await
                .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?,
        None =>
            Ok(()),
    }
}

struct WeatherCommand {
    service: Arc<WeatherService>,
}

struct GoogleCommand {
    service: Arc<WeatherService>,
}

struct SetCommand {
    service: Arc<WeatherService>,
}

struct UnsetCommand {
    service: Arc<WeatherService>,
}

/**
 * Factory function that will create instances of all implemented commands in this module.
 */
pub fn mk(config: &BotConfig) -> Vec<Box<dyn BotCommand>> {
    commands(Arc::new(WeatherService::new(config)))
}

/**
 * Create the weather commands sharing the given service.
 */
pub fn commands(service: Arc<WeatherService>) -> Vec<Box<dyn BotCommand>> {
    vec![
        Box::new(WeatherCommand { service: service.clone() }),
        Box::new(GoogleCommand { service: service.clone() }),
        Box::new(SetCommand { service: service.clone() }),
        Box::new(UnsetCommand { service }),
    ]
}

fn error_reply(command: &str, err: &LookupError) -> String {
    match err {
        LookupError::Upstream { .. } =>
            warn!("{}: {:?}", command, err),
        _ =>
            debug!("{}: {:?}", command, err),
    }
    format!("Error: {}", err)
}

#[async_trait::async_trait]
impl BotCommand for WeatherCommand {
    fn trigger(&self) -> &'static str {
        "weather"
    }

    async fn handle(&self, params: BotParameters) -> BotCommandResult {
        let response_target = params.response_target()?;
        if !self.service.config.is_enabled(self.trigger(), &response_target, true) {
            return Ok(BotResponse::Ignore);
        }

        let result = match WeatherRequest::parse(&params.args) {
            Ok(request) => self.service.weather(&request, &params).await,
            Err(err) => Err(err),
        };

        Ok(BotResponse::Privmsg(
            response_target,
            match result {
                Ok(reply) =>
                    reply,
                Err(err) =>
                    error_reply(self.trigger(), &err),
            }))
    }

    fn flush(&self) -> std::io::Result<()> {
        self.service.flush()
    }
}

#[async_trait::async_trait]
impl BotCommand for GoogleCommand {
    fn trigger(&self) -> &'static str {
        "google"
    }

    async fn handle(&self, params: BotParameters) -> BotCommandResult {
        let response_target = params.response_target()?;
        if !self.service.config.is_enabled("weather", &response_target, true) {
            return Ok(BotResponse::Ignore);
        }

        if params.args.is_empty() {
            return Ok(BotResponse::Privmsg(
                response_target,
                format!("Usage: {}google <location>", params.leader)));
        }

        Ok(BotResponse::Privmsg(
            response_target,
            match self.service.google(&params.args.join(" ")).await {
                Ok(reply) =>
                    reply,
                Err(err) =>
                    error_reply(self.trigger(), &err),
            }))
    }
}

#[async_trait::async_trait]
impl BotCommand for SetCommand {
    fn trigger(&self) -> &'static str {
        "set"
    }

    async fn handle(&self, params: BotParameters) -> BotCommandResult {
        let response_target = params.response_target()?;
        if params.args.is_empty() {
            return Ok(BotResponse::Privmsg(
                response_target,
                format!("Usage: {}set <location>", params.leader)));
        }

        let identity = params.identity()?;
        let location = params.args.join(" ");
        if let Err(err) = self.service.set_location(&identity, &location).await {
            warn!("Unable to write location database: {}", err);
        }
        Ok(BotResponse::Privmsg(
            response_target,
            format!("Location for {} set to {}.", bold(&format!("*!{}", identity)), location)))
    }
}

#[async_trait::async_trait]
impl BotCommand for UnsetCommand {
    fn trigger(&self) -> &'static str {
        "unset"
    }

    async fn handle(&self, params: BotParameters) -> BotCommandResult {
        let response_target = params.response_target()?;
        let identity = params.identity()?;
        let hostmask = bold(&format!("*!{}", identity));

        let removed = match self.service.unset_location(&identity).await {
            Ok(removed) =>
                removed,
            Err(err) => {
                warn!("Unable to write location database: {}", err);
                true
            },
        };

        Ok(BotResponse::Privmsg(
            response_target,
            if removed {
                format!("Location for {} removed.", hostmask)
            } else {
                format!("Error: No entry for {} exists.", hostmask)
            }))
    }
}
