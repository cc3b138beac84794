//! Typed record extraction through a targeted trie.

use pretty_assertions::assert_eq;
use std::sync::Once;
use xmlscan::{analyse, scan, ErrorKind, EventTrie};

static TRACING_INIT: Once = Once::new();

/// Enable scanner logs with `RUST_LOG=xmlscan=debug`.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_test_writer()
                .init();
        }
    });
}

const DEPARTMENTS: [&str; 3] = ["Engineering", "Sales", "Support"];

fn company(count: usize) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<company name=\"Acme &amp; Co\">\n  <employees>\n");
    for i in 1..=count {
        xml.push_str(&format!(
            "    <employee id=\"{i}\">\n      <id>{i}</id>\n      <name>Employee {i}</name>\n      <position>Engineer &lt;L{}&gt;</position>\n      <department>{}</department>\n    </employee>\n",
            i % 4,
            DEPARTMENTS[i % DEPARTMENTS.len()],
        ));
    }
    xml.push_str("  </employees>\n  <!-- generated -->\n</company>\n");
    xml
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Employee {
    id: u32,
    name: String,
    position: String,
    department: String,
}

#[derive(Debug, Default)]
struct Collect {
    company: String,
    active: Employee,
    employees: Vec<Employee>,
}

fn employee_trie() -> EventTrie<Collect> {
    let mut trie = EventTrie::new();
    trie.add_attribute_event(trie.root(), "company", "name", |c: &mut Collect, v| {
        c.company = v.to_owned();
        Ok(())
    });

    let employee = trie.add_element(trie.root(), "company/employees/employee");
    trie[employee]
        .on_tag_open(|c: &mut Collect, _| {
            c.active = Employee::default();
            Ok(())
        })
        .on_tag_close(|c, _| {
            let done = std::mem::take(&mut c.active);
            c.employees.push(done);
            Ok(())
        });

    let id = trie.add_element(employee, "id");
    trie[id].on_text(|c: &mut Collect, text| {
        c.active.id = text.parse::<u32>()?;
        Ok(())
    });
    let name = trie.add_element(employee, "name");
    trie[name].on_text(|c: &mut Collect, text| {
        c.active.name = text.to_owned();
        Ok(())
    });
    let position = trie.add_element(employee, "position");
    trie[position].on_text(|c: &mut Collect, text| {
        c.active.position = text.to_owned();
        Ok(())
    });
    let department = trie.add_element(employee, "department");
    trie[department].on_text(|c: &mut Collect, text| {
        c.active.department = text.to_owned();
        Ok(())
    });
    trie
}

#[test]
fn names_only() {
    let mut trie: EventTrie<Vec<String>> = EventTrie::new();
    let name = trie.add_element(trie.root(), "company/employees/employee/name");
    trie[name].on_text(|names, text| {
        names.push(text.to_owned());
        Ok(())
    });

    let mut names = Vec::new();
    scan(&company(824), &trie, &mut names).unwrap();
    assert_eq!(names.len(), 824);
    assert_eq!(names[0], "Employee 1");
}

#[test]
fn typed_records() {
    init_tracing();
    let mut collect = Collect::default();
    scan(&company(824), &employee_trie(), &mut collect).unwrap();

    assert_eq!(collect.company, "Acme & Co");
    assert_eq!(collect.employees.len(), 824);
    assert_eq!(
        collect.employees[0],
        Employee {
            id: 1,
            name: "Employee 1".to_string(),
            position: "Engineer <L1>".to_string(),
            department: "Sales".to_string(),
        }
    );
}

#[test]
fn handler_error_aborts() {
    init_tracing();
    let xml = company(3).replace("<id>2</id>", "<id>two</id>");
    let mut collect = Collect::default();
    let err = scan(&xml, &employee_trie(), &mut collect).unwrap_err();
    assert!(err.parsing().is_none());
    // The first record completed before the bad id was reached
    assert_eq!(collect.employees.len(), 1);
}

#[test]
fn error_position_maps_to_line() {
    init_tracing();
    let xml = company(2).replace("</name>", "</nam>");
    let err = scan(&xml, &employee_trie(), &mut Collect::default()).unwrap_err();
    let parsing = err.parsing().copied().unwrap();
    assert_eq!(parsing.kind, ErrorKind::MismatchedTag);
    assert_eq!(parsing.line_col(&xml), (6, 23));
}

#[test]
fn analyse_company() {
    assert_eq!(
        analyse(&company(2)).unwrap(),
        vec![
            "/company",
            "/company#comment",
            "/company/employees",
            "/company/employees/employee",
            "/company/employees/employee/department",
            "/company/employees/employee/department#content",
            "/company/employees/employee/id",
            "/company/employees/employee/id#content",
            "/company/employees/employee/name",
            "/company/employees/employee/name#content",
            "/company/employees/employee/position",
            "/company/employees/employee/position#content",
            "/company/employees/employee@id",
            "/company@name",
        ]
    );
}
