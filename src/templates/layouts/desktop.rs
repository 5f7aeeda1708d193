use maud::{html, Markup, DOCTYPE};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 900px; margin: 0 auto; padding: 1rem; }
header { display: flex; align-items: center; justify-content: space-between; padding: 0.5rem 0; border-bottom: 1px solid #ddd; margin-bottom: 1rem; }
fieldset { border: 1px solid #ccc; border-radius: 6px; margin-bottom: 1rem; }
label { display: block; margin: 0.4rem 0; }
input[type=number], select { padding: 0.2rem 0.4rem; }
button { padding: 0.35rem 0.9rem; margin-right: 0.5rem; cursor: pointer; }
table { border-collapse: collapse; width: 100%; margin-top: 1rem; }
th, td { border: 1px solid #ddd; padding: 0.3rem 0.5rem; text-align: left; font-size: 0.9rem; }
td img { max-height: 48px; }
#status { margin-top: 0.5rem; color: #555; }
"#;

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (maud::PreEscaped(STYLE)) }
            }
            body {
                header {
                    h3 { "Finn Torget Parser" }
                    nav {
                        a href="/" { "Home" }
                    }
                }
                main {
                    (content)
                }
            }
        }
    }
}
