use super::*;

impl Dom {
    pub fn attr(&self, node_id: NodeId, name: &str) -> Option<String> {
        self.element(node_id)?
            .attrs
            .get(&name.to_ascii_lowercase())
            .cloned()
    }

    pub fn has_attr(&self, node_id: NodeId, name: &str) -> bool {
        self.element(node_id)
            .is_some_and(|element| element.attrs.contains_key(&name.to_ascii_lowercase()))
    }

    /// Sets an attribute. Writing `value` or `checked` also resets the live
    /// state they seed, as the parser does for fresh markup.
    pub fn set_attr(&mut self, node_id: NodeId, name: &str, value: &str) -> Result<()> {
        let name = name.to_ascii_lowercase();
        let element = self.require_element_mut(node_id, "set attribute")?;
        match name.as_str() {
            "value" if !element.has_input_type(&["file"]) => element.value = value.to_string(),
            "checked" => element.checked = true,
            _ => {}
        }
        element.attrs.insert(name, value.to_string());
        Ok(())
    }

    pub fn remove_attr(&mut self, node_id: NodeId, name: &str) -> Result<()> {
        self.require_element_mut(node_id, "remove attribute")?
            .attrs
            .remove(&name.to_ascii_lowercase());
        Ok(())
    }

    /// The `name` attribute, empty when absent.
    pub fn name(&self, node_id: NodeId) -> String {
        self.attr(node_id, "name").unwrap_or_default()
    }

    pub fn multiple(&self, node_id: NodeId) -> bool {
        self.has_attr(node_id, "multiple")
    }
}
