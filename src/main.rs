use serde_json::json;

use diorama::Engine;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(source) = args.next() else {
        eprintln!("usage: diorama <url-or-file> [generator] [selector]");
        std::process::exit(2);
    };
    let generator = args.next().unwrap_or_else(|| "extrude".to_string());
    let selector = args.next().unwrap_or_else(|| "div".to_string());

    let options = json!({
        "generator": generator,
        "src": { "selector": selector },
    });

    let mut engine = Engine::new();
    let result = if std::path::Path::new(&source).exists() {
        match std::fs::read_to_string(&source) {
            Ok(html) => engine.init(&html, "file:///local", options),
            Err(e) => {
                eprintln!("cannot read {source}: {e}");
                std::process::exit(1);
            }
        }
    } else {
        engine.init_from_url(&source, options)
    };

    match result {
        Ok(true) => {
            let Some(scene) = engine.scene() else {
                return;
            };
            println!(
                "scene: {} objects, {} lights, gravity {:?}",
                scene.objects.len(),
                scene.lights.len(),
                scene.gravity
            );
            for obj in &scene.objects {
                let [x, y, z] = obj.desc.position;
                let [w, h, d] = obj.desc.dims;
                println!(
                    "  #{:<3} {:?} pos ({x:8.1}, {y:8.1}, {z:8.1})  dims {w:.1}x{h:.1}x{d:.1}  mass {:.0}",
                    obj.id.0, obj.desc.kind, obj.desc.mass
                );
            }
        }
        Ok(false) => {
            eprintln!("no rendering backend available; document left as-is");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("init failed: {e}");
            std::process::exit(1);
        }
    }
}
