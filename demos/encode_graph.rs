//! Encoding an object graph with shared references.
//!
//! Run with: cargo run --example encode_graph

use serde::Serialize;
use serde_rpcjson::{rpc_object, to_string, StreamWriter, TypeRegistry};
use std::error::Error;

#[derive(Serialize)]
struct Message {
    id: i64,
    subject: String,
    body: String,
}

struct Account {
    name: String,
}

struct Transfer {
    from: std::rc::Rc<Account>,
    to: std::rc::Rc<Account>,
    cents: i64,
}

rpc_object!(Account => "com.example.Account");
rpc_object!(Transfer => "com.example.Transfer");

fn main() -> Result<(), Box<dyn Error>> {
    // Plain serde types need no registration
    let message = Message {
        id: 9_007_199_254_740_993,
        subject: "Grüße".to_string(),
        body: "line one\nline two\u{2028}".to_string(),
    };
    println!("serde output:\n{}\n", to_string(&message)?);

    // Registered types keep object identity across the graph
    let mut registry = TypeRegistry::new();
    registry
        .register("com.example.Account", "com.example.Account/1", |w, a: &Account| {
            w.write_string(Some(&a.name));
            Ok(())
        })
        .register("com.example.Transfer", "com.example.Transfer/2", |w, t: &Transfer| {
            w.write_object(&*t.from)?;
            w.write_object(&*t.to)?;
            w.write_long(t.cents);
            Ok(())
        });

    let account = std::rc::Rc::new(Account {
        name: "savings".to_string(),
    });
    let transfer = Transfer {
        from: account.clone(),
        to: account,
        cents: 1_250,
    };

    let mut writer = StreamWriter::new().with_type_serializer(&registry);
    writer.write_object(&transfer)?;
    println!("registry output:\n{}", writer.finish()?);

    Ok(())
}
