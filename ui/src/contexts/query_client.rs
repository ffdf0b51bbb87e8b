use query::QueryClient;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct QueryClientProviderProps {
    /// Defaults to a fresh cache for this provider's subtree.
    #[prop_or_default]
    pub client: Option<QueryClient>,
    pub children: Children,
}

/// Makes one query cache available to every hook below it.
#[function_component]
pub fn QueryClientProvider(props: &QueryClientProviderProps) -> Html {
    let client = {
        let given = props.client.clone();
        use_memo((), move |_| given.unwrap_or_default())
    };

    html! {
        <ContextProvider<QueryClient> context={(*client).clone()}>
            {props.children.clone()}
        </ContextProvider<QueryClient>>
    }
}

#[hook]
pub fn use_query_client() -> QueryClient {
    use_context::<QueryClient>()
        .expect("use_query_client must be used within a QueryClientProvider")
}
