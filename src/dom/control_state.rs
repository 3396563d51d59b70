use super::*;

impl Dom {
    /// Live value of a control. Checkboxes and radios without a `value`
    /// attribute read as `"on"`; a `<select>` reads its selected option.
    pub fn value(&self, node_id: NodeId) -> Result<String> {
        let element = self.require_element(node_id, "value")?;
        if element.tag == "select" {
            return self.select_value(node_id);
        }
        if element.has_input_type(&["checkbox", "radio"]) && !element.attrs.contains_key("value") {
            return Ok("on".to_string());
        }
        Ok(element.value.clone())
    }

    pub fn set_value(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        if self.tag_name(node_id) == Some("select") {
            return self.set_select_value(node_id, value);
        }
        let element = self.require_element_mut(node_id, "set value")?;
        if element.has_input_type(&["file"]) {
            // only the empty string is accepted, and it clears the selection
            if value.is_empty() {
                element.files.clear();
                element.value.clear();
            }
            return Ok(());
        }
        if element.has_input_type(&["checkbox", "radio"]) {
            element.attrs.insert("value".into(), value.into());
        }
        element.value = value.to_string();
        Ok(())
    }

    pub fn checked(&self, node_id: NodeId) -> Result<bool> {
        Ok(self.require_element(node_id, "checked")?.checked)
    }

    pub fn set_checked(&mut self, node_id: NodeId, checked: bool) -> Result<()> {
        let is_radio = self
            .require_element(node_id, "set checked")?
            .has_input_type(&["radio"]);
        if checked && is_radio {
            for other in self.radio_group(node_id) {
                if let Some(element) = self.element_mut(other) {
                    element.checked = false;
                }
            }
        }
        self.require_element_mut(node_id, "set checked")?.checked = checked;
        Ok(())
    }

    /// Other radios sharing `radio`'s name and owning form (or the document
    /// when it has none).
    fn radio_group(&self, radio: NodeId) -> Vec<NodeId> {
        let name = self.name(radio);
        if name.is_empty() {
            return Vec::new();
        }
        let form = self.find_ancestor_by_tag(radio, "form");
        self.descendant_elements(form.unwrap_or(self.root))
            .into_iter()
            .filter(|node| {
                *node != radio
                    && self.input_type(*node).as_deref() == Some("radio")
                    && self.name(*node) == name
                    && self.find_ancestor_by_tag(*node, "form") == form
            })
            .collect()
    }

    pub fn files(&self, node_id: NodeId) -> Result<Vec<FileHandle>> {
        Ok(self.require_element(node_id, "files")?.files.clone())
    }

    /// Attaches `files`, keeping only the first one unless the input is
    /// `multiple`. Returns whether the file list changed.
    pub fn set_files(&mut self, node_id: NodeId, files: &[FileHandle]) -> Result<bool> {
        let element = self.require_element_mut(node_id, "set files")?;
        if !element.has_input_type(&["file"]) {
            return Err(Error::TypeMismatch {
                expected: "input[type=file]".into(),
                actual: element.input_type().unwrap_or_else(|| element.tag.clone()),
            });
        }
        let keep = if element.attrs.contains_key("multiple") {
            files.len()
        } else {
            files.len().min(1)
        };
        let files = &files[..keep];
        if element.files.as_slice() == files {
            return Ok(false);
        }
        element.files = files.to_vec();
        element.value = files
            .first()
            .map(|file| format!("C:\\fakepath\\{}", file.name))
            .unwrap_or_default();
        Ok(true)
    }

    pub fn clear_files(&mut self, node_id: NodeId) -> Result<()> {
        let element = self.require_element_mut(node_id, "clear files")?;
        element.files.clear();
        element.value.clear();
        Ok(())
    }

    /// `<option>` descendants of a select, in document order.
    pub fn select_options(&self, select_node: NodeId) -> Vec<NodeId> {
        let mut options = self.descendant_elements(select_node);
        options.retain(|node| self.tag_name(*node) == Some("option"));
        options
    }

    /// The option's `value` attribute, or its trimmed text.
    pub fn option_value(&self, option_node: NodeId) -> Result<String> {
        let element = self.require_element(option_node, "option value")?;
        if element.tag != "option" {
            return Err(Error::TypeMismatch {
                expected: "option".into(),
                actual: element.tag.clone(),
            });
        }
        Ok(match element.attrs.get("value") {
            Some(value) => value.clone(),
            None => self.text_content(option_node).trim().to_string(),
        })
    }

    pub fn option_selected(&self, option_node: NodeId) -> bool {
        self.has_attr(option_node, "selected")
    }

    pub fn set_option_selected(&mut self, option_node: NodeId, selected: bool) -> Result<()> {
        let attrs = &mut self.require_element_mut(option_node, "select option")?.attrs;
        if selected {
            attrs.insert("selected".into(), String::new());
        } else {
            attrs.remove("selected");
        }
        Ok(())
    }

    fn require_select(&self, node_id: NodeId, operation: &str) -> Result<()> {
        match self.require_element(node_id, operation)?.tag.as_str() {
            "select" => Ok(()),
            other => Err(Error::TypeMismatch {
                expected: "select".into(),
                actual: other.to_string(),
            }),
        }
    }

    /// Marks the first option valued `requested` as the only selected one;
    /// no option stays selected when none matches.
    pub fn set_select_value(&mut self, select_node: NodeId, requested: &str) -> Result<()> {
        self.require_select(select_node, "set select value")?;
        let mut matched = false;
        for option in self.select_options(select_node) {
            let hit = !matched && self.option_value(option)? == requested;
            matched |= hit;
            self.set_option_selected(option, hit)?;
        }
        Ok(())
    }

    /// Value of the first selected option, falling back to the first option.
    fn select_value(&self, select_node: NodeId) -> Result<String> {
        let options = self.select_options(select_node);
        let chosen = options
            .iter()
            .find(|option| self.option_selected(**option))
            .or_else(|| options.first());
        match chosen {
            Some(option) => self.option_value(*option),
            None => Ok(String::new()),
        }
    }

    /// Values of every selected option, in document order.
    pub fn selected_values(&self, select_node: NodeId) -> Result<Vec<String>> {
        self.require_select(select_node, "selected values")?;
        self.select_options(select_node)
            .into_iter()
            .filter(|option| self.option_selected(*option))
            .map(|option| self.option_value(option))
            .collect()
    }

    /// Seeds textarea values from their text and leaves at most one checked
    /// radio per group (the last one in document order).
    pub(super) fn settle_parsed_controls(&mut self) -> Result<()> {
        for node in self.descendant_elements(self.root) {
            if self.tag_name(node) == Some("textarea") {
                let text = self.text_content(node);
                self.require_element_mut(node, "textarea")?.value = text;
            } else if self.input_type(node).as_deref() == Some("radio") && self.checked(node)? {
                self.set_checked(node, true)?;
            }
        }
        Ok(())
    }
}
