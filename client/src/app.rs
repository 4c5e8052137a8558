//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::notice_dialog::NoticeDialog;
use crate::pages::{
    admin::AdminPage, dashboard::DashboardPage, devices::DevicesPage, lessons::LessonsPage, login::LoginPage,
    register::RegisterPage, root::RootPage, teacher::TeacherPage,
};
use crate::state::{config::ConfigState, notice::NoticeState, session::SessionState};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session, backend configuration and notice contexts, then
/// sets up client-side routing. The session is read from browser storage
/// once hydrated; until then every guarded page shows its loading state.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(SessionState::default());
    let config = RwSignal::new(ConfigState::default());
    let notice = RwSignal::new(NoticeState::default());

    provide_context(session);
    provide_context(config);
    provide_context(notice);

    // Browser storage only exists after hydration.
    Effect::new(move || {
        session.set(SessionState::from_store(&crate::util::auth::browser_session()));
    });

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let endpoints = crate::net::api::fetch_app_config().await;
        config.update(|c| c.apply(endpoints));
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/touchglyph.css"/>
        <Title text="TouchGlyph"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=RootPage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("register") view=RegisterPage/>
                <Route path=StaticSegment("admin") view=AdminPage/>
                <Route path=StaticSegment("teacher") view=TeacherPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
                <Route path=StaticSegment("devices") view=DevicesPage/>
                <Route path=StaticSegment("lessons") view=LessonsPage/>
            </Routes>
        </Router>
        <NoticeDialog/>
    }
}
