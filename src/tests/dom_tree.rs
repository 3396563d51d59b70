use super::*;

#[test]
fn append_child_moves_nodes_between_parents() -> Result<()> {
    let mut dom = Dom::new();
    let first = dom.create_element("div");
    let second = dom.create_element("div");
    let input = dom.create_element("input");
    dom.append_children(dom.root(), &[first, second])?;
    dom.append_child(first, input)?;

    dom.append_child(second, input)?;

    assert!(dom.children(first).is_empty());
    assert_eq!(dom.children(second), &[input]);
    assert_eq!(dom.parent(input), Some(second));
    assert!(dom.is_descendant_of(input, dom.root()));
    Ok(())
}

#[test]
fn append_child_rejects_cycles_and_leaf_parents() -> Result<()> {
    let mut dom = Dom::new();
    let outer = dom.create_element("div");
    let inner = dom.create_element("div");
    let text = dom.create_text("hi");
    dom.append_child(outer, inner)?;

    assert!(matches!(
        dom.append_child(inner, outer),
        Err(Error::DomMutation(_))
    ));
    assert!(matches!(
        dom.append_child(text, outer),
        Err(Error::DomMutation(_))
    ));
    assert!(matches!(
        dom.append_child(outer, dom.root()),
        Err(Error::DomMutation(_))
    ));
    Ok(())
}

#[test]
fn remove_node_detaches_but_keeps_the_node_usable() -> Result<()> {
    let mut dom = Dom::new();
    let form = create_form(&mut dom)?;
    let input = create_input(&mut dom, &[("name", "email")])?;
    dom.append_child(form, input)?;

    dom.remove_node(input)?;

    assert_eq!(dom.parent(input), None);
    assert!(get_form_controls(&dom, form).is_empty());
    assert_eq!(dom.name(input), "email");
    assert!(dom.remove_child(form, input).is_err());
    assert!(dom.remove_node(dom.root()).is_err());
    Ok(())
}

#[test]
fn descendants_and_ancestors_follow_the_tree() -> Result<()> {
    let dom = Dom::parse_html(
        "<form id='f'><div id='d'><input id='a'></div><input id='b'></form><p id='p'></p>",
    )?;
    let id = |name: &str| dom.by_id(name).ok_or_else(|| Error::InvalidNode(name.into()));
    let form = id("f")?;

    let ids = dom
        .descendant_elements(form)
        .into_iter()
        .filter_map(|node| dom.attr(node, "id"))
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["d", "a", "b"]);
    assert_eq!(dom.find_ancestor_by_tag(id("a")?, "form"), Some(form));
    assert_eq!(dom.find_ancestor_by_tag(id("p")?, "form"), None);
    assert_eq!(dom.child_elements(form).len(), 2);
    Ok(())
}

#[test]
fn attributes_are_case_insensitive_and_seed_live_state() -> Result<()> {
    let mut dom = Dom::new();
    let input = create_input(&mut dom, &[("TYPE", "checkbox"), ("Value", "yes")])?;

    assert_eq!(dom.attr(input, "type").as_deref(), Some("checkbox"));
    assert_eq!(dom.value(input)?, "yes");
    assert!(!dom.checked(input)?);

    dom.set_attr(input, "checked", "")?;
    assert!(dom.checked(input)?);

    dom.remove_attr(input, "VALUE")?;
    assert_eq!(dom.value(input)?, "on");
    Ok(())
}

#[test]
fn radio_check_unchecks_the_rest_of_its_form_group() -> Result<()> {
    let mut dom = Dom::parse_html(
        r#"<form id='one'>
             <input id='a' type='radio' name='pick' value='a' checked>
             <input id='b' type='radio' name='pick' value='b'>
           </form>
           <form id='two'>
             <input id='c' type='radio' name='pick' value='c' checked>
           </form>"#,
    )?;
    let a = dom.by_id("a").ok_or_else(|| Error::InvalidNode("a".into()))?;
    let b = dom.by_id("b").ok_or_else(|| Error::InvalidNode("b".into()))?;
    let c = dom.by_id("c").ok_or_else(|| Error::InvalidNode("c".into()))?;

    dom.set_checked(b, true)?;

    assert!(!dom.checked(a)?);
    assert!(dom.checked(b)?);
    assert!(dom.checked(c)?);
    Ok(())
}

#[test]
fn set_files_rejects_non_file_inputs() -> Result<()> {
    let mut dom = Dom::new();
    let text = create_input(&mut dom, &[("type", "text")])?;
    let file = create_input(&mut dom, &[("type", "file")])?;
    let handle = FileHandle::new("a.txt", "text/plain", b"abc".to_vec());

    assert!(matches!(
        dom.set_files(text, std::slice::from_ref(&handle)),
        Err(Error::TypeMismatch { .. })
    ));
    assert!(dom.set_files(file, std::slice::from_ref(&handle))?);
    assert!(!dom.set_files(file, std::slice::from_ref(&handle))?);
    assert_eq!(dom.value(file)?, "C:\\fakepath\\a.txt");
    assert_eq!(handle.size(), 3);

    dom.set_value(file, "")?;
    assert!(dom.files(file)?.is_empty());
    Ok(())
}

#[test]
fn element_accessors_reject_text_nodes() {
    let mut dom = Dom::new();
    let text = dom.create_text("plain");

    assert!(matches!(dom.value(text), Err(Error::InvalidNode(_))));
    assert!(matches!(dom.set_attr(text, "name", "x"), Err(Error::InvalidNode(_))));
    assert_eq!(dom.tag_name(text), None);
    assert_eq!(dom.text_content(text), "plain");
}

#[test]
fn deeply_nested_markup_is_walked_without_recursion() -> Result<()> {
    let depth = 100_000;
    let html = format!(
        "<form id='f'>{}<input name='x'><span>deep</span>{}</form>",
        "<div>".repeat(depth),
        "</div>".repeat(depth)
    );
    let mut dom = Dom::parse_html(&html)?;
    let form = dom.by_id("f").ok_or_else(|| Error::InvalidNode("f".into()))?;

    let defaults = get_form_default_values(&mut dom, form)?;

    assert_eq!(get(&defaults.default_data, "x"), Value::from(""));
    assert_eq!(dom.text_content(form), "deep");
    assert_eq!(dom.descendant_elements(form).len(), depth + 2);
    Ok(())
}

#[test]
fn node_ids_from_another_document_are_rejected() -> Result<()> {
    let mut large = Dom::new();
    for _ in 0..8 {
        large.create_element("div");
    }
    let foreign = large.create_element("input");
    let mut dom = Dom::new();
    let div = dom.create_element("div");

    assert_eq!(dom.kind(foreign), None);
    assert_eq!(dom.parent(foreign), None);
    assert!(dom.children(foreign).is_empty());
    assert_eq!(dom.tag_name(foreign), None);
    assert!(matches!(dom.value(foreign), Err(Error::InvalidNode(_))));
    assert!(matches!(
        dom.append_child(div, foreign),
        Err(Error::InvalidNode(_))
    ));
    assert!(matches!(dom.remove_node(foreign), Err(Error::InvalidNode(_))));
    assert_eq!(dom.text_content(foreign), "");
    Ok(())
}

#[test]
fn parse_html_reads_unquoted_attributes_and_multibyte_text() -> Result<()> {
    let dom = Dom::parse_html("<p id=greeting class=big>zażółć &amp; 日本 &#x41;</p>")?;
    let p = dom
        .by_id("greeting")
        .ok_or_else(|| Error::InvalidNode("greeting".into()))?;

    assert_eq!(dom.attr(p, "class").as_deref(), Some("big"));
    assert_eq!(dom.text_content(p), "zażółć & 日本 A");
    Ok(())
}
