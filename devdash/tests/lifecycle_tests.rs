//! Fetch cycles end to end: reducer -> effect handler -> task -> result action

use std::time::Duration;

use devdash::action::Action;
use devdash::api::{ApiClient, Endpoints, WeatherQuery};
use devdash::effect::{handle_effect, Effect, Services};
use devdash::location::{Coordinates, Geolocator};
use devdash::reducer::reducer;
use devdash::state::AppState;
use devdash::theme::{Theme, ThemeContext, ThemeStore};
use devdash_core::{assert_emitted, EffectRuntime};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Runtime plus services, driven one action at a time.
struct Dash {
    runtime: EffectRuntime<AppState, Action, Effect>,
    services: Services,
}

impl Dash {
    fn new(server: &MockServer) -> Self {
        Self::with_services(Services {
            api: ApiClient::new(Endpoints::all(server.uri())).unwrap(),
            theme: ThemeContext::load(None, None),
            geolocator: Geolocator::with_env_value(None, None),
        })
    }

    fn with_services(services: Services) -> Self {
        Self {
            runtime: EffectRuntime::new(AppState::default(), reducer),
            services,
        }
    }

    fn dispatch(&mut self, action: Action) -> bool {
        let services = &mut self.services;
        self.runtime
            .dispatch(action, &mut |effect, ctx| handle_effect(effect, ctx, services))
    }

    fn state(&self) -> &AppState {
        self.runtime.state()
    }

    async fn next_action(&mut self) -> Action {
        tokio::time::timeout(Duration::from_secs(5), self.runtime.next_action())
            .await
            .expect("timeout")
            .expect("channel closed")
    }

    /// Dispatch the next result action; returns whether state changed.
    async fn settle(&mut self) -> bool {
        let action = self.next_action().await;
        self.dispatch(action)
    }

    async fn assert_quiet(&mut self, wait: Duration) {
        let late = tokio::time::timeout(wait, self.runtime.next_action()).await;
        assert!(late.is_err(), "unexpected late action: {:?}", late);
    }
}

fn profile(login: &str) -> serde_json::Value {
    serde_json::json!({
        "login": login,
        "name": login.to_uppercase(),
        "avatar_url": "https://avatars.example/1",
        "public_repos": 1,
        "followers": 2,
        "following": 3,
        "html_url": format!("https://github.com/{login}")
    })
}

async fn mock_user(server: &MockServer, login: &str, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{login}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(profile(login))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

async fn mock_city(server: &MockServer, city: &str, latitude: f64, delay: Duration) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", city))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({
                    "results": [{
                        "name": city,
                        "latitude": latitude,
                        "longitude": 10.0,
                        "country": "Testland"
                    }]
                }))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

async fn mock_forecast(server: &MockServer, temperature: f64) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current_weather": {
                "temperature": temperature,
                "windspeed": 3.0,
                "winddirection": 180,
                "weathercode": 1,
                "time": "2024-05-01T12:00"
            }
        })))
        .mount(server)
        .await;
}

fn shown_login(state: &AppState) -> Option<&str> {
    state.github.state().data().map(|p| p.login.as_str())
}

fn shown_place(state: &AppState) -> Option<&str> {
    state
        .weather
        .state()
        .data()
        .map(|r| r.location.name.as_str())
}

#[tokio::test]
async fn test_new_username_aborts_in_flight_lookup() {
    let server = MockServer::start().await;
    mock_user(&server, "slow", Duration::from_millis(300)).await;
    mock_user(&server, "fast", Duration::ZERO).await;
    let mut dash = Dash::new(&server);

    dash.dispatch(Action::GithubUsernameSet("slow".into()));
    dash.dispatch(Action::GithubUsernameSet("fast".into()));

    assert!(dash.settle().await);
    assert_eq!(shown_login(dash.state()), Some("fast"));

    // The superseded task never reports back
    dash.assert_quiet(Duration::from_millis(600)).await;
    assert_eq!(shown_login(dash.state()), Some("fast"));
}

#[tokio::test]
async fn test_new_city_supersedes_slow_geocode() {
    let server = MockServer::start().await;
    mock_city(&server, "Oslo", 59.9, Duration::from_millis(300)).await;
    mock_city(&server, "Lima", -12.0, Duration::ZERO).await;
    mock_forecast(&server, 18.5).await;
    let mut dash = Dash::new(&server);

    dash.dispatch(Action::WeatherCitySet("Oslo".into()));
    assert!(dash.state().weather.state().is_loading());
    dash.dispatch(Action::WeatherCitySet("Lima".into()));

    let action = dash.next_action().await;
    assert!(
        matches!(&action, Action::WeatherDidLoad { report, .. } if report.location.name == "Lima"),
        "got {:?}",
        action
    );
    assert!(dash.dispatch(action));
    assert_eq!(shown_place(dash.state()), Some("Lima"));

    dash.assert_quiet(Duration::from_millis(600)).await;
    assert_eq!(shown_place(dash.state()), Some("Lima"));
}

#[tokio::test]
async fn test_quit_while_weather_in_flight_cancels_everything() {
    let server = MockServer::start().await;
    mock_city(&server, "Oslo", 59.9, Duration::from_millis(200)).await;
    mock_forecast(&server, 4.0).await;
    mock_user(&server, "slow", Duration::from_millis(200)).await;
    let mut dash = Dash::new(&server);

    dash.dispatch(Action::WeatherCitySet("Oslo".into()));
    dash.dispatch(Action::GithubUsernameSet("slow".into()));
    assert!(dash.dispatch(Action::Quit));

    dash.assert_quiet(Duration::from_millis(500)).await;
    assert!(dash.state().weather.state().is_idle());
    assert!(dash.state().github.state().is_idle());
}

#[tokio::test]
async fn test_unknown_city_surfaces_error_then_recovers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Nonexistentville"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;
    mock_city(&server, "Lima", -12.0, Duration::ZERO).await;
    mock_forecast(&server, 18.5).await;
    let mut dash = Dash::new(&server);

    dash.dispatch(Action::WeatherCitySet("Nonexistentville".into()));
    dash.settle().await;
    assert_eq!(dash.state().weather.state().error(), Some("City not found"));

    dash.dispatch(Action::WeatherCitySet("Lima".into()));
    assert!(dash.state().weather.state().error().is_none());
    dash.settle().await;
    assert_eq!(shown_place(dash.state()), Some("Lima"));
}

#[tokio::test]
async fn test_locate_fetches_weather_at_device_location() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "48.85"))
        .and(query_param("longitude", "2.35"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current_weather": {
                "temperature": 12.0,
                "windspeed": 3.0,
                "weathercode": 3,
                "time": "2024-05-01T12:00"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    let coords = Coordinates::new(48.85, 2.35);
    let mut dash = Dash::with_services(Services {
        api: ApiClient::new(Endpoints::all(server.uri())).unwrap(),
        theme: ThemeContext::load(None, None),
        geolocator: Geolocator::with_env_value(Some(coords), None),
    });

    dash.dispatch(Action::WeatherLocate);
    let located = dash.next_action().await;
    assert_emitted!(
        vec![located.clone()],
        Action::WeatherDidLocate { request: 1, coords: c } if *c == coords
    );

    assert!(dash.dispatch(located));
    assert_eq!(
        dash.state().weather.key(),
        Some(&WeatherQuery::Coordinates(coords))
    );
    dash.settle().await;
    assert_eq!(shown_place(dash.state()), Some("Current location"));
}

#[tokio::test]
async fn test_unavailable_location_uses_default_coordinates() {
    let server = MockServer::start().await;
    mock_forecast(&server, 24.0).await;
    let mut dash = Dash::new(&server);

    dash.dispatch(Action::WeatherLocate);
    let located = dash.next_action().await;
    assert_emitted!(
        vec![located.clone()],
        Action::WeatherDidLocate { coords, .. } if *coords == devdash::location::DEFAULT_COORDINATES
    );
    dash.dispatch(located);
    dash.settle().await;
    assert!(dash.state().weather.state().data().is_some());
}

#[tokio::test]
async fn test_theme_toggle_persists_and_reports_back() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let store = ThemeStore::new(dir.path().join("settings.json"));
    let mut dash = Dash::with_services(Services {
        api: ApiClient::new(Endpoints::all(server.uri())).unwrap(),
        theme: ThemeContext::load(Some(store.clone()), None),
        geolocator: Geolocator::with_env_value(None, None),
    });
    assert_eq!(dash.state().theme, Theme::Light);

    dash.dispatch(Action::ThemeToggle);
    assert!(dash.settle().await);

    assert_eq!(dash.state().theme, Theme::Dark);
    assert_eq!(store.load(), Some(Theme::Dark));
}

#[tokio::test]
async fn test_github_error_then_success_on_new_username() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/ghost-user"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mock_user(&server, "octocat", Duration::ZERO).await;
    let mut dash = Dash::new(&server);

    dash.dispatch(Action::GithubUsernameSet("ghost-user".into()));
    dash.settle().await;
    assert_eq!(dash.state().github.state().error(), Some("GitHub responded 404"));
    assert!(dash.state().github.state().data().is_none());

    dash.dispatch(Action::GithubUsernameSet("octocat".into()));
    dash.settle().await;
    assert_eq!(shown_login(dash.state()), Some("octocat"));
}
