//=============================================================================
// File: src/screens/detail.rs
//=============================================================================
use crate::app_state::AppState;
use crate::app_state_mut::AppStateMut;
use crate::components::notice::Notice;
use crate::components::pico::Button;
use crate::components::pico::Card;
use crate::components::pico::Loading;
use crate::components::rating_stars::RatingStars;
use crate::hooks::use_api_checker::use_api_checker;
use crate::hooks::use_session::use_session;
use crate::screens::bookmark_place;
use crate::screens::spawn_refreshing_write;
use api::models::Comment;
use api::models::Place;
use api::models::PlaceId;
use api::models::Stars;
use api::ApiError;
use dioxus::prelude::*;

/// `/place/:id`. Keyed on the id so that following a link to another place
/// starts from a clean slate.
#[component]
pub fn Detail(id: PlaceId) -> Element {
    rsx! {
        DetailBody { key: "{id}", id }
    }
}

#[component]
fn DetailBody(id: PlaceId) -> Element {
    let app_state = use_context::<AppState>();
    let session = use_session();

    let mut place = use_resource({
        let client = app_state.client.clone();
        move || {
            let client = client.clone();
            async move { client.place(id).await }
        }
    });

    rsx! {
        match &*place.read() {
            None => rsx! {
                Card { Loading {} }
            },
            Some(Err(ApiError::NotFound { .. })) => rsx! {
                Card {
                    h3 { "Data tidak ditemukan." }
                }
            },
            Some(Err(e)) => rsx! {
                Card {
                    h3 { "Gagal memuat tempat" }
                    p { "{e}" }
                    button { onclick: move |_| place.restart(), "Coba lagi" }
                }
            },
            Some(Ok(info)) => rsx! {
                PlaceInfo { place: info.clone() }
                if session.is_signed_in() {
                    RatePlace { id }
                } else {
                    Card {
                        h4 { "Beri Rating" }
                        p { "Login dulu untuk beri rating dan komentar." }
                    }
                }
                Comments { id }
            },
        }
    }
}

#[component]
fn PlaceInfo(place: Place) -> Element {
    let app_state = use_context::<AppState>();
    let notice = use_context::<AppStateMut>().notice;
    let session = use_session();
    let checker = use_api_checker();

    let preference = *app_state.prefs.display_preference();
    let price = place.price_label(&preference);
    let rating = place.rating_label();
    let location = place.location_label();
    let image = place.image_url().map(str::to_string);
    let map_link = place.map_link().map(str::to_string);
    let gallery: Vec<String> = place.gallery().into_iter().map(str::to_string).collect();

    rsx! {
        Card {
            div {
                style: "display: grid; grid-template-columns: repeat(auto-fit, minmax(18rem, 1fr)); gap: 1.5rem;",
                if let Some(src) = image {
                    img {
                        src: "{src}",
                        alt: "{place.place_name}",
                        style: "width: 100%; max-height: 20rem; object-fit: cover; border-radius: var(--pico-border-radius);",
                    }
                }
                div {
                    h2 { style: "margin-bottom: 0.25rem;", "{place.place_name}" }
                    p { style: "color: var(--pico-muted-color);", "{location}" }
                    p {
                        "Harga: "
                        strong { "{price}" }
                        br {}
                        "Rating: "
                        strong { "{rating}" }
                    }
                    if let Some(description) = &place.description {
                        p { "{description}" }
                    }
                    if let Some(address) = &place.address {
                        p { "Alamat: {address}" }
                    }
                    div {
                        style: "display: flex; gap: 0.5rem;",
                        Button {
                            on_click: {
                                let session = session.clone();
                                let place = place.clone();
                                move |_: MouseEvent| bookmark_place(session.client(), checker, notice, place.clone())
                            },
                            "Bookmark"
                        }
                        if let Some(href) = map_link {
                            a {
                                href: "{href}",
                                target: "_blank",
                                rel: "noopener noreferrer",
                                role: "button",
                                class: "secondary outline",
                                "Map"
                            }
                        }
                    }
                }
            }
            if !gallery.is_empty() {
                h4 { style: "margin-top: 1.5rem;", "Galeri" }
                div {
                    style: "display: grid; grid-template-columns: repeat(3, 1fr); gap: 0.75rem;",
                    for (n, src) in gallery.into_iter().enumerate().map(|(i, src)| (i + 1, src)) {
                        img {
                            key: "{n}",
                            src: "{src}",
                            alt: "Galeri {n}",
                            loading: "lazy",
                            style: "width: 100%; height: 10rem; object-fit: cover; border-radius: var(--pico-border-radius);",
                        }
                    }
                }
            }
        }
    }
}

/// Star picker and Save. A successful save emits the refresh signal so
/// recommendation views pick up the new rating.
#[component]
fn RatePlace(id: PlaceId) -> Element {
    let app_state = use_context::<AppState>();
    let mut notice = use_context::<AppStateMut>().notice;
    let session = use_session();
    let checker = use_api_checker();

    let mut stars = use_signal(|| None::<Stars>);
    let mut saving = use_signal(|| false);

    // Pre-select an earlier rating unless a star was already picked.
    use_future({
        let session = session.clone();
        move || {
            let client = session.client();
            let mut checker = checker;
            async move {
                let previous = client.my_rating_for(id).await;
                if checker.observe(&previous) {
                    let picked = *stars.peek();
                    let shown = initial_stars(picked, previous.ok().flatten());
                    if shown != picked {
                        stars.set(shown);
                    }
                }
            }
        }
    });

    let save = move |_: MouseEvent| {
        let Some(rating) = stars() else {
            notice.set(Some(Notice::error("Pilih rating 1..5")));
            return;
        };
        let client = session.client();
        let refresh = app_state.refresh.clone();
        let mut checker = checker;
        saving.set(true);
        spawn_refreshing_write(
            refresh,
            async move { client.rate(id, rating).await },
            move |result| {
                saving.set(false);
                if checker.check(result).is_some() {
                    notice.set(Some(Notice::info("Rating disimpan.")));
                }
            },
        );
    };

    rsx! {
        Card {
            h4 { "Beri Rating" }
            RatingStars { value: stars(), on_change: move |s| stars.set(Some(s)) }
            Button {
                style: "margin-top: 1rem;".to_string(),
                busy: saving(),
                on_click: save,
                "Simpan"
            }
        }
    }
}

/// A star picked before the saved rating arrives wins over it.
fn initial_stars(picked: Option<Stars>, saved: Option<Stars>) -> Option<Stars> {
    picked.or(saved)
}

#[component]
fn Comments(id: PlaceId) -> Element {
    let app_state = use_context::<AppState>();
    let session = use_session();
    let checker = use_api_checker();

    let mut comments = use_resource({
        let client = app_state.client.clone();
        move || {
            let client = client.clone();
            async move { client.comments(id).await }
        }
    });
    let mut text = use_signal(String::new);
    let mut sending = use_signal(|| false);

    let send = {
        let session = session.clone();
        move |_: MouseEvent| {
            let body = text.peek().trim().to_string();
            if body.is_empty() {
                return;
            }
            let client = session.client();
            let mut checker = checker;
            sending.set(true);
            spawn(async move {
                let sent = checker.check(client.add_comment(id, &body).await);
                sending.set(false);
                if sent.is_some() {
                    text.set(String::new());
                    comments.restart();
                }
            });
        }
    };

    rsx! {
        Card {
            h4 { "Komentar" }
            if session.is_signed_in() {
                div {
                    role: "group",
                    input {
                        r#type: "text",
                        placeholder: "Tulis komentar...",
                        value: "{text}",
                        oninput: move |evt| text.set(evt.value()),
                    }
                    Button { busy: sending(), on_click: send, "Kirim" }
                }
            }
            match &*comments.read() {
                None => rsx! {
                    Loading {}
                },
                Some(Err(e)) => rsx! {
                    p { "Gagal memuat komentar: {e}" }
                    button { onclick: move |_| comments.restart(), "Coba lagi" }
                },
                Some(Ok(list)) if list.is_empty() => rsx! {
                    small { style: "color: var(--pico-muted-color);", "Belum ada komentar." }
                },
                Some(Ok(list)) => rsx! {
                    for comment in list.iter().cloned() {
                        CommentRow { key: "{comment.id}", comment }
                    }
                },
            }
        }
    }
}

#[component]
fn CommentRow(comment: Comment) -> Element {
    rsx! {
        article {
            style: "padding: 0.75rem 1rem; margin: 0.5rem 0;",
            small { style: "color: var(--pico-muted-color);", "{comment.posted_label()}" }
            p { style: "margin: 0;", "{comment.text}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_rating_fills_an_empty_picker_only() {
        let two = Stars::new(2);
        let five = Stars::new(5);
        assert_eq!(initial_stars(None, five), five);
        assert_eq!(initial_stars(two, five), two);
        assert_eq!(initial_stars(two, None), two);
        assert_eq!(initial_stars(None, None), None);
    }
}
