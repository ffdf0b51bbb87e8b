use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[function_component]
pub fn NotFoundPage() -> Html {
    html! {
        <div class="text-center space-y-4">
            <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">
                {"No such page"}
            </h1>
            <p class="text-gray-600 dark:text-gray-300">
                {"Asset masters are browsed per tenant on the masters page."}
            </p>
            <Link<Route> to={Route::AssetMasters} classes="underline">
                {"Go to asset masters"}
            </Link<Route>>
        </div>
    }
}
