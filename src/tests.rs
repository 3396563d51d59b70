use super::*;

mod dom_tree;
mod html_parse;

fn obj<const N: usize>(entries: [(&str, Value); N]) -> Value {
    Value::from_entries(entries)
}

fn strings(values: &[&str]) -> Value {
    Value::array(values.iter().map(|value| Value::from(*value)).collect())
}

fn create_input(dom: &mut Dom, attrs: &[(&str, &str)]) -> Result<NodeId> {
    let input = dom.create_element("input");
    for (name, value) in attrs {
        dom.set_attr(input, name, value)?;
    }
    Ok(input)
}

fn create_form(dom: &mut Dom) -> Result<NodeId> {
    let form = dom.create_element("form");
    dom.set_attr(form, "role", "form")?;
    dom.append_child(dom.root(), form)?;
    Ok(form)
}

struct LoginForm {
    form: NodeId,
    email: NodeId,
    password: NodeId,
    submit: NodeId,
}

fn create_login_form(dom: &mut Dom) -> Result<LoginForm> {
    let form = create_form(dom)?;
    let email = create_input(dom, &[("name", "email"), ("type", "email")])?;
    let password = create_input(dom, &[("name", "password"), ("type", "password")])?;
    let submit = create_input(dom, &[("type", "submit")])?;
    let account = dom.create_element("fieldset");
    dom.set_attr(account, "name", "account")?;
    dom.append_children(account, &[email, password])?;
    dom.append_children(form, &[account, submit])?;
    Ok(LoginForm {
        form,
        email,
        password,
        submit,
    })
}

struct SignupForm {
    form: NodeId,
    show_password: NodeId,
    public_email_yes: NodeId,
    public_email_no: NodeId,
    first_name: NodeId,
    picture: NodeId,
    extra_pictures: NodeId,
    tech: NodeId,
    films: NodeId,
}

fn create_signup_form(dom: &mut Dom) -> Result<SignupForm> {
    let form = create_form(dom)?;

    let email = create_input(dom, &[("name", "email"), ("type", "email")])?;
    let password = create_input(dom, &[("name", "password"), ("type", "password")])?;
    let show_password = create_input(dom, &[("name", "showPassword"), ("type", "checkbox")])?;
    let confirm_password =
        create_input(dom, &[("name", "confirmPassword"), ("type", "password")])?;
    let public_email_yes = create_input(
        dom,
        &[("name", "publicEmail"), ("value", "yes"), ("type", "radio")],
    )?;
    let public_email_no = create_input(
        dom,
        &[("name", "publicEmail"), ("value", "no"), ("type", "radio")],
    )?;
    let account = dom.create_element("fieldset");
    dom.set_attr(account, "name", "account")?;
    dom.append_children(
        account,
        &[
            email,
            password,
            show_password,
            public_email_yes,
            public_email_no,
            confirm_password,
        ],
    )?;
    dom.append_child(form, account)?;

    let profile = dom.create_element("fieldset");
    dom.set_attr(profile, "name", "profile")?;
    let first_name = create_input(dom, &[("name", "firstName")])?;
    let last_name = create_input(dom, &[("name", "lastName")])?;
    let bio = create_input(dom, &[("name", "bio")])?;
    dom.append_children(profile, &[first_name, last_name, bio])?;
    dom.append_child(form, profile)?;

    let picture = create_input(dom, &[("name", "profile.picture"), ("type", "file")])?;
    dom.append_child(form, picture)?;
    let extra_pictures = create_input(dom, &[("name", "extra.pictures"), ("type", "file")])?;
    dom.set_attr(extra_pictures, "multiple", "")?;
    dom.append_child(form, extra_pictures)?;

    let submit = create_input(dom, &[("type", "submit")])?;
    let tech = create_input(
        dom,
        &[("type", "checkbox"), ("name", "preferences"), ("value", "technology")],
    )?;
    let films = create_input(
        dom,
        &[("type", "checkbox"), ("name", "preferences"), ("value", "films")],
    )?;
    dom.append_children(form, &[tech, films, submit])?;

    Ok(SignupForm {
        form,
        show_password,
        public_email_yes,
        public_email_no,
        first_name,
        picture,
        extra_pictures,
        tech,
        films,
    })
}

fn signup_data() -> Value {
    obj([
        (
            "account",
            obj([
                ("email", Value::from("jacek@soplica.com")),
                ("password", Value::from("password")),
                ("confirmPassword", Value::from("password")),
                ("showPassword", Value::from(true)),
                ("publicEmail", Value::from("yes")),
            ]),
        ),
        (
            "profile",
            obj([
                ("firstName", Value::from("Jacek")),
                ("lastName", Value::from("Soplica")),
                ("bio", Value::from("bio")),
                ("picture", Value::Undefined),
            ]),
        ),
        ("extra", obj([("pictures", Value::array(Vec::new()))])),
        ("preferences", strings(&["technology"])),
    ])
}
