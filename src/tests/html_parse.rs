use super::*;

#[test]
fn parse_html_builds_elements_text_and_comments() -> Result<()> {
    let dom = Dom::parse_html("<!doctype html><div id='box'>a &lt; b<!-- note --></div>")?;
    let div = dom
        .by_id("box")
        .ok_or_else(|| Error::InvalidNode("box".into()))?;

    let kinds = dom
        .children(div)
        .iter()
        .map(|child| dom.kind(*child))
        .collect::<Vec<_>>();
    assert_eq!(kinds, vec![Some(NodeKind::Text), Some(NodeKind::Comment)]);
    assert_eq!(dom.text_content(div), "a < b");
    assert_eq!(dom.kind(dom.root()), Some(NodeKind::Document));
    Ok(())
}

#[test]
fn parse_html_lowercases_names_and_keeps_first_attribute() -> Result<()> {
    let dom = Dom::parse_html("<INPUT ID=x NAME='first' name='second' Disabled>")?;
    let input = dom.by_id("x").ok_or_else(|| Error::InvalidNode("x".into()))?;

    assert_eq!(dom.tag_name(input), Some("input"));
    assert_eq!(dom.name(input), "first");
    assert_eq!(dom.attr(input, "disabled").as_deref(), Some(""));
    Ok(())
}

#[test]
fn parse_html_closes_implicit_options() -> Result<()> {
    let dom = Dom::parse_html(
        "<select id='s'><option value='1'>One<option value='2' selected>Two</select>",
    )?;
    let select = dom.by_id("s").ok_or_else(|| Error::InvalidNode("s".into()))?;

    assert_eq!(dom.select_options(select).len(), 2);
    assert_eq!(dom.value(select)?, "2");
    assert_eq!(dom.child_elements(select).len(), 2);
    Ok(())
}

#[test]
fn parse_html_ignores_stray_end_tags() -> Result<()> {
    let dom = Dom::parse_html("<form id='f'></span><input id='i'></form>")?;
    let form = dom.by_id("f").ok_or_else(|| Error::InvalidNode("f".into()))?;
    let input = dom.by_id("i").ok_or_else(|| Error::InvalidNode("i".into()))?;

    assert_eq!(dom.parent(input), Some(form));
    Ok(())
}

#[test]
fn parse_html_keeps_only_the_last_checked_radio() -> Result<()> {
    let dom = Dom::parse_html(
        "<form><input id='a' type='radio' name='r' checked><input id='b' type='radio' name='r' checked></form>",
    )?;
    let a = dom.by_id("a").ok_or_else(|| Error::InvalidNode("a".into()))?;
    let b = dom.by_id("b").ok_or_else(|| Error::InvalidNode("b".into()))?;

    assert!(!dom.checked(a)?);
    assert!(dom.checked(b)?);
    Ok(())
}

#[test]
fn parse_html_reports_malformed_markup() {
    assert!(matches!(
        Dom::parse_html("<div"),
        Err(Error::HtmlParse(_))
    ));
    assert!(matches!(
        Dom::parse_html("<!-- open"),
        Err(Error::HtmlParse(_))
    ));
    assert!(matches!(
        Dom::parse_html("<textarea>never closed"),
        Err(Error::HtmlParse(_))
    ));
}
