#![allow(missing_docs)]
#![allow(dead_code)]

pub const CONFIG: &str = r#"
{
    "service": {
        "name": "ingest",
        "replicas": 3,
        "ratio": 0.75,
        "enabled": true,
        "owner": null
    },
    "limits": [
        1024,
        -1,
        18446744073709551615,
        340282366920938463463374607431768211456
    ],
    "routes": [
        { "path": "/v1/items", "methods": ["GET", "POST"] },
        { "path": "/v1/items/{id}", "methods": [] }
    ],
    "banner": "café \"quoted\"\ttabbed",
    "matrix": [[1, 2], [3, 4], []]
}
"#;

pub const CONFIG_COMPACT: &str = r#"{"service":{"name":"ingest","replicas":3,"ratio":0.75,"enabled":true,"owner":null},"limits":[1024,-1,18446744073709551615,340282366920938463463374607431768211456],"routes":[{"path":"/v1/items","methods":["GET","POST"]},{"path":"/v1/items/{id}","methods":[]}],"banner":"café \"quoted\"\ttabbed","matrix":[[1,2],[3,4],[]]}"#;
