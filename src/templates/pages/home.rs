// templates/pages/home.rs

use crate::templates::desktop_layout;
use maud::{html, Markup, PreEscaped};

const APP_JS: &str = r#"
async function loadSubcategories() {
  const select = document.getElementById('subcategory');
  const resp = await fetch('/api/torget-subcategories');
  const data = await resp.json();
  for (const item of data.items) {
    const option = document.createElement('option');
    option.value = item.url;
    option.textContent = item.name;
    select.appendChild(option);
  }
}

function captureForm(preview) {
  const select = document.getElementById('subcategory');
  const form = new URLSearchParams();
  form.set('category_name', 'Torget');
  form.set('subcategory_name', select.options[select.selectedIndex].textContent);
  form.set('subcategory_url', select.value);
  form.set('max_items', document.getElementById('max-items').value || '50');
  if (preview) form.set('preview', '1');
  if (document.getElementById('fiks-ferdig').checked) form.set('fiks_ferdig', '1');
  if (document.getElementById('published-today').checked) form.set('published_today', '1');
  const from = document.getElementById('price-from').value;
  const to = document.getElementById('price-to').value;
  if (from) form.set('price_from', from);
  if (to) form.set('price_to', to);
  return form;
}

function setStatus(text) {
  document.getElementById('status').textContent = text;
}

async function preview() {
  setStatus('Scraping…');
  const resp = await fetch('/api/parse', {
    method: 'POST',
    headers: {'Content-Type': 'application/x-www-form-urlencoded'},
    body: captureForm(true),
  });
  if (!resp.ok) { setStatus('Request failed (' + resp.status + ')'); return; }
  const data = await resp.json();
  renderPreview(data.items);
  setStatus(data.message || data.items.length + ' listings');
}

function renderPreview(items) {
  const tbody = document.querySelector('#preview tbody');
  tbody.innerHTML = '';
  for (const item of items) {
    const row = document.createElement('tr');
    for (const key of ['title', 'price', 'status']) {
      const cell = document.createElement('td');
      cell.textContent = item[key];
      row.appendChild(cell);
    }
    const link = document.createElement('td');
    const a = document.createElement('a');
    a.href = item.url;
    a.textContent = 'open';
    link.appendChild(a);
    row.appendChild(link);
    tbody.appendChild(row);
  }
}

async function download(url, body, filename) {
  const resp = await fetch(url, {method: 'POST', body: body});
  if (!resp.ok) { setStatus('Request failed (' + resp.status + ')'); return; }
  const type = resp.headers.get('Content-Type') || '';
  if (type.includes('json')) {
    const data = await resp.json();
    setStatus(data.message || 'nothing to download');
    return;
  }
  const blob = await resp.blob();
  const link = document.createElement('a');
  link.href = URL.createObjectURL(blob);
  link.download = filename;
  link.click();
  URL.revokeObjectURL(link.href);
  setStatus('Downloaded ' + filename);
}

async function exportListings() {
  setStatus('Scraping…');
  await download('/api/parse', captureForm(false), 'finn_listings.xlsx');
}

async function recheck() {
  const input = document.getElementById('recheck-file');
  if (!input.files.length) { setStatus('Choose a file first'); return; }
  setStatus('Rechecking…');
  const form = new FormData();
  form.append('file', input.files[0]);
  form.append('max_items', document.getElementById('recheck-max').value || '50');
  await download('/api/recheck', form, 'finn_changes.xlsx');
}

document.addEventListener('DOMContentLoaded', () => {
  loadSubcategories();
  document.getElementById('btn-preview').addEventListener('click', preview);
  document.getElementById('btn-export').addEventListener('click', exportListings);
  document.getElementById('btn-recheck').addEventListener('click', recheck);
});
"#;

pub fn home_page() -> Markup {
    desktop_layout(
        "Finn Torget Parser",
        html! {
            fieldset {
                legend { "Capture" }
                label {
                    "Subcategory "
                    select id="subcategory" {}
                }
                label {
                    "Max items "
                    input id="max-items" type="number" value="50" min="1";
                }
                label {
                    input id="fiks-ferdig" type="checkbox";
                    " Fiks ferdig only"
                }
                label {
                    input id="published-today" type="checkbox";
                    " Published today"
                }
                label {
                    "Price from "
                    input id="price-from" type="number" min="0";
                    " to "
                    input id="price-to" type="number" min="0";
                }
                button id="btn-preview" type="button" { "Preview" }
                button id="btn-export" type="button" { "Download XLSX" }
            }

            fieldset {
                legend { "Recheck an export" }
                label {
                    "Exported file "
                    input id="recheck-file" type="file" accept=".xlsx";
                }
                label {
                    "Max items "
                    input id="recheck-max" type="number" value="50" min="1";
                }
                button id="btn-recheck" type="button" { "Recheck" }
            }

            p id="status" {}

            table id="preview" {
                thead {
                    tr {
                        th { "Title" }
                        th { "Price" }
                        th { "Status" }
                        th { "Link" }
                    }
                }
                tbody {}
            }

            script { (PreEscaped(APP_JS)) }
        },
    )
}
