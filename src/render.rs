use crate::constants::*;
use crate::core::{PanelState, Tab};
use crate::dom::{self, el};
use anyhow::anyhow;
use web_sys as web;

/// DOM nodes owned by the panel. Cloning only clones handles.
#[derive(Clone)]
pub struct Views {
    pub document: web::Document,
    pub style: web::HtmlElement,
    pub toggle: web::HtmlElement,
    pub panel: web::HtmlElement,
    pub header: web::HtmlElement,
    pub tabs: [web::HtmlElement; 3],
    pub logs: web::HtmlElement,
    pub stats: web::HtmlElement,
    pub markers: web::HtmlElement,
}

impl Views {
    /// Build the toggle button and the panel, then inject them together with
    /// the stylesheet. Nothing is attached unless every node was created.
    pub fn build(document: &web::Document) -> anyhow::Result<Self> {
        let style = el(document, "style", None, Some(PANEL_CSS))?;
        let toggle = el(document, "button", Some(CLASS_TOGGLE), Some(TOGGLE_LABEL))?;
        let panel = el(document, "div", Some(CLASS_PANEL), None)?;
        let header = el(document, "div", Some(CLASS_HEADER), None)?;
        let title = el(document, "div", None, Some(PANEL_TITLE))?;
        let tab_row = el(document, "div", Some(CLASS_TABS), None)?;
        let tabs = [
            el(document, "button", Some(CLASS_TAB), Some(Tab::Logs.label()))?,
            el(document, "button", Some(CLASS_TAB), Some(Tab::Stats.label()))?,
            el(document, "button", Some(CLASS_TAB), Some(Tab::Markers.label()))?,
        ];
        let body = el(document, "div", Some(CLASS_BODY), None)?;
        let logs = el(document, "div", Some(CLASS_LOGS), None)?;
        let stats = el(document, "div", None, None)?;
        let markers = el(document, "div", None, None)?;

        let append = |parent: &web::HtmlElement, child: &web::HtmlElement| {
            parent
                .append_child(child)
                .map(|_| ())
                .map_err(|e| anyhow!("appendChild: {:?}", e))
        };
        for tab in &tabs {
            append(&tab_row, tab)?;
        }
        append(&header, &title)?;
        append(&header, &tab_row)?;
        append(&body, &logs)?;
        append(&body, &stats)?;
        append(&body, &markers)?;
        append(&panel, &header)?;
        append(&panel, &body)?;

        let head = document.head().ok_or_else(|| anyhow!("document has no <head>"))?;
        let page = document.body().ok_or_else(|| anyhow!("document has no <body>"))?;
        head.append_child(&style)
            .map_err(|e| anyhow!("inject style: {:?}", e))?;
        let injected = page
            .append_child(&toggle)
            .and_then(|_| page.append_child(&panel))
            .map_err(|e| anyhow!("inject panel: {:?}", e));
        if let Err(e) = injected {
            dom::detach(&style);
            dom::detach(&toggle);
            return Err(e);
        }

        Ok(Self {
            document: document.clone(),
            style,
            toggle,
            panel,
            header,
            tabs,
            logs,
            stats,
            markers,
        })
    }

    #[inline]
    pub fn tab_button(&self, tab: Tab) -> &web::HtmlElement {
        &self.tabs[tab_index(tab)]
    }

    pub fn set_open(&self, open: bool) {
        dom::set_visible(&self.panel, open);
    }

    /// Highlight the active tab button and show only its view.
    pub fn show_tab(&self, active: Tab) {
        for tab in Tab::ALL {
            let selected = tab == active;
            _ = self
                .tab_button(tab)
                .class_list()
                .toggle_with_force(CLASS_ACTIVE, selected);
            dom::set_visible(self.view(tab), selected);
        }
    }

    #[inline]
    pub fn view(&self, tab: Tab) -> &web::HtmlElement {
        match tab {
            Tab::Logs => &self.logs,
            Tab::Stats => &self.stats,
            Tab::Markers => &self.markers,
        }
    }

    pub fn render(&self, tab: Tab, state: &PanelState) {
        // On failure the previous projection stays. Not logged: a log call
        // here would re-enter the console capture mid-render.
        _ = match tab {
            Tab::Logs => self.render_logs(state),
            Tab::Stats => self.render_stats(state),
            Tab::Markers => self.render_markers(state),
        };
    }

    pub fn render_all(&self, state: &PanelState) {
        for tab in Tab::ALL {
            self.render(tab, state);
        }
    }

    fn render_logs(&self, state: &PanelState) -> anyhow::Result<()> {
        let frag = self.document.create_document_fragment();
        for entry in state.visible_logs() {
            let class = format!("{} __{}", CLASS_LOG, entry.level().class_suffix());
            let line = el(&self.document, "div", Some(class.as_str()), Some(entry.text()))?;
            frag.append_child(&line)
                .map_err(|e| anyhow!("appendChild: {:?}", e))?;
        }
        dom::clear_children(&self.logs);
        self.logs
            .append_child(&frag)
            .map_err(|e| anyhow!("appendChild: {:?}", e))?;
        self.logs.set_scroll_top(self.logs.scroll_height());
        Ok(())
    }

    fn render_stats(&self, state: &PanelState) -> anyhow::Result<()> {
        let row = el(&self.document, "div", Some(CLASS_ROW), None)?;
        let label = el(&self.document, "div", None, Some(FPS_LABEL))?;
        let value = el(
            &self.document,
            "div",
            Some(CLASS_STAT),
            Some(state.fps.fps().to_string().as_str()),
        )?;
        row.append_child(&label)
            .and_then(|_| row.append_child(&value))
            .map_err(|e| anyhow!("appendChild: {:?}", e))?;
        dom::clear_children(&self.stats);
        self.stats
            .append_child(&row)
            .map_err(|e| anyhow!("appendChild: {:?}", e))?;
        Ok(())
    }

    fn render_markers(&self, state: &PanelState) -> anyhow::Result<()> {
        dom::clear_children(&self.markers);
        if state.markers.is_empty() {
            let empty = el(&self.document, "div", None, Some(NO_MARKERS_TEXT))?;
            self.markers
                .append_child(&empty)
                .map_err(|e| anyhow!("appendChild: {:?}", e))?;
            return Ok(());
        }
        for id in state.markers.iter() {
            let chip = el(&self.document, "span", Some(CLASS_MARKER), Some(id))?;
            self.markers
                .append_child(&chip)
                .map_err(|e| anyhow!("appendChild: {:?}", e))?;
        }
        Ok(())
    }

    /// Remove every injected node from the document.
    pub fn remove(&self) {
        dom::detach(&self.panel);
        dom::detach(&self.toggle);
        dom::detach(&self.style);
    }
}

#[inline]
fn tab_index(tab: Tab) -> usize {
    match tab {
        Tab::Logs => 0,
        Tab::Stats => 1,
        Tab::Markers => 2,
    }
}

/// Whether a panel from any earlier attach is still in the document. This is
/// also true for a panel injected by another copy of the module.
pub fn panel_present(document: &web::Document) -> bool {
    let selector = format!(".{}, .{}", CLASS_PANEL, CLASS_TOGGLE);
    matches!(document.query_selector(&selector), Ok(Some(_)))
}
