use animaru_core::AnimalVariant;
use yew::prelude::*;

use crate::strings;

#[derive(Properties, PartialEq)]
pub(crate) struct SuccessBannerProps {
    pub variant: &'static AnimalVariant,
}

/// Congratulation card for a finished animal.
///
/// Rendered into `document.body` so it floats above the grid and pool regardless of where the view mounts it.
#[function_component]
pub(crate) fn SuccessBanner(props: &SuccessBannerProps) -> Html {
    let host = gloo::utils::body();
    let card = html! {
        <div id="success-message">
            <h2>{strings::banner_heading(props.variant)}</h2>
            <p>{strings::banner_body(props.variant)}</p>
        </div>
    };
    create_portal(card, host.into())
}
