use maud::{html, Markup, DOCTYPE};

/// Mail clients strip `<style>` blocks, so everything is inline.
pub fn email_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (title) }
            }
            body style="font-family: Arial, sans-serif; color: #333;" {
                (content)
                br;
                p style="font-size: 12px; color: #777;" {
                    "Offboarding integrity monitor, automatic run"
                }
            }
        }
    }
}
