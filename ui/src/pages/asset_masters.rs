use payloads::masters;
use query::{AssetLookup, LookupConfig};
use yew::prelude::*;

use crate::hooks::{
    QueryHookReturn, use_asset_classification, use_asset_parent_sub_type,
    use_asset_type,
};

pub const ASSET_MODULE: &str = "ASSET";

const LOOKUP_TYPES: [(&str, &str); 4] = [
    (masters::ASSET_CLASSIFICATION, "Classification"),
    (masters::ASSET_PARENT_CATEGORY, "Parent category"),
    (masters::ASSET_SUB_CATEGORY, "Sub category"),
    ("none", "Nothing"),
];

/// Browse asset masters. All three lookup hooks are mounted; only the one
/// matching the selected type fetches.
#[function_component]
pub fn AssetMastersPage() -> Html {
    let tenant_id = use_state(|| "pb".to_string());
    let lookup_type = use_state(|| masters::ASSET_CLASSIFICATION.to_string());

    let classification = use_asset_classification(
        &tenant_id,
        ASSET_MODULE,
        &lookup_type,
        LookupConfig::default(),
    );
    let parent_category =
        use_asset_type(&tenant_id, ASSET_MODULE, &lookup_type, LookupConfig::default());
    let sub_category = use_asset_parent_sub_type(
        &tenant_id,
        ASSET_MODULE,
        &lookup_type,
        LookupConfig::default(),
    );

    let on_tenant_change = {
        let tenant_id = tenant_id.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            tenant_id.set(input.value());
        })
    };

    let on_type_change = {
        let lookup_type = lookup_type.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            lookup_type.set(select.value());
        })
    };

    let rows = if let Some(hook) = &classification {
        master_table(hook, "asset classifications", |c| {
            (c.code.clone(), c.name.clone(), String::new(), c.active)
        })
    } else if let Some(hook) = &parent_category {
        master_table(hook, "parent categories", |c| {
            (
                c.code.clone(),
                c.name.clone(),
                c.asset_classification.clone(),
                c.active,
            )
        })
    } else if let Some(hook) = &sub_category {
        master_table(hook, "sub categories", |c| {
            (
                c.code.clone(),
                c.name.clone(),
                c.asset_parent_category.clone(),
                c.active,
            )
        })
    } else {
        html! {
            <p class="text-neutral-600 dark:text-neutral-400">
                {"No lookup matches this type."}
            </p>
        }
    };

    let heading = match AssetLookup::from_type(&lookup_type) {
        Some(variant) => format!("{variant} of {} ({})", *tenant_id, ASSET_MODULE),
        None => format!("{} is not an asset master", *lookup_type),
    };

    html! {
        <div class="space-y-6">
            <div class="flex gap-4 items-end">
                <label class="block">
                    <span class="text-sm text-neutral-700 dark:text-neutral-300">
                        {"Tenant"}
                    </span>
                    <input
                        class="mt-1 block rounded-md border-neutral-300"
                        value={(*tenant_id).clone()}
                        onchange={on_tenant_change}
                    />
                </label>
                <label class="block">
                    <span class="text-sm text-neutral-700 dark:text-neutral-300">
                        {"Master"}
                    </span>
                    <select
                        class="mt-1 block rounded-md border-neutral-300"
                        onchange={on_type_change}
                    >
                        {for LOOKUP_TYPES.iter().map(|(value, label)| html! {
                            <option
                                value={*value}
                                selected={*value == lookup_type.as_str()}
                            >
                                {*label}
                            </option>
                        })}
                    </select>
                </label>
            </div>
            <h2 class="text-lg font-semibold">{heading}</h2>
            {rows}
        </div>
    }
}

/// Table of (code, name, parent code, active) rows for one master.
fn master_table<T, F>(
    hook: &QueryHookReturn<Vec<T>>,
    context: &str,
    row: F,
) -> Html
where
    F: Fn(&T) -> (String, String, String, bool),
{
    let refetch = hook.refetch.clone();
    hook.render(context, |records, is_fetching, error| {
        html! {
            <div>
                <div class="flex justify-between items-center mb-2">
                    <span class="text-sm text-neutral-600 dark:text-neutral-400">
                        {format!("{} records", records.len())}
                    </span>
                    {if is_fetching {
                        html! {
                            <span class="text-xs text-neutral-500 italic">
                                {"Refreshing..."}
                            </span>
                        }
                    } else {
                        html! {}
                    }}
                    <button
                        class="text-sm underline"
                        onclick={refetch.reform(|_: MouseEvent| ())}
                    >
                        {"Reload"}
                    </button>
                </div>
                {if let Some(err) = error {
                    html! {
                        <p class="mb-2 text-sm text-red-700 dark:text-red-400">
                            {"Error refreshing: "}{err}
                        </p>
                    }
                } else {
                    html! {}
                }}
                <table class="min-w-full text-sm">
                    <thead>
                        <tr>
                            <th class="text-left">{"Code"}</th>
                            <th class="text-left">{"Name"}</th>
                            <th class="text-left">{"Parent"}</th>
                            <th class="text-left">{"Active"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {for records.iter().map(|record| {
                            let (code, name, parent, active) = row(record);
                            html! {
                                <tr key={code.clone()}>
                                    <td>{code}</td>
                                    <td>{name}</td>
                                    <td>{parent}</td>
                                    <td>{if active { "yes" } else { "no" }}</td>
                                </tr>
                            }
                        })}
                    </tbody>
                </table>
            </div>
        }
    })
}
