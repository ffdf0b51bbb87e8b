use payloads::MdmsClient;
use yew::prelude::*;
use yew_router::prelude::*;

mod contexts;
pub mod hooks;
mod logs;
mod pages;

use contexts::QueryClientProvider;
use pages::{AssetMastersPage, NotFoundPage};

// MDMS client - configurable via environment or same-origin fallback
pub fn get_mdms_client() -> MdmsClient {
    // Set at build time, e.g. MDMS_URL=http://127.0.0.1:8090 trunk serve
    let address = option_env!("MDMS_URL")
        .map(|url| url.to_string())
        .unwrap_or_else(|| {
            web_sys::window()
                .and_then(|window| window.location().origin().ok())
                .unwrap_or_default()
        });

    MdmsClient::new(address)
}

#[function_component]
pub fn App() -> Html {
    logs::init_logging();
    html! {
        <QueryClientProvider>
            <BrowserRouter>
                <div class="min-h-screen bg-white dark:bg-gray-900 text-gray-900 dark:text-gray-100 transition-colors">
                    <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                        <Switch<Route> render={switch} />
                    </main>
                </div>
            </BrowserRouter>
        </QueryClientProvider>
    }
}

#[derive(Clone, Routable, PartialEq)]
enum Route {
    #[at("/")]
    Home,
    #[at("/assets")]
    AssetMasters,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <Redirect<Route> to={Route::AssetMasters} /> },
        Route::AssetMasters => html! { <AssetMastersPage /> },
        Route::NotFound => html! { <NotFoundPage /> },
    }
}
