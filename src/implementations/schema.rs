use serde_json::{json, Value};

/// Version of the asset contract below. Bump when a field changes.
pub const SCHEMA_VERSION: &str = "1";

/// Fields the service is told are mandatory
pub const REQUIRED_FIELDS: [&str; 9] = [
    "requirements",
    "systemDesign",
    "classDiagram",
    "sequenceDiagram",
    "sourceCode",
    "testCases",
    "complianceScore",
    "standardsCompliance",
    "simData",
];

/// Response schema in the Generative Language API `responseSchema` dialect
pub fn asset_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "requirements": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "List of functional, safety, and non-functional requirements in EARS syntax."
            },
            "systemDesign": {
                "type": "STRING",
                "description": "Detailed description of the service-oriented design, middleware selection, and safety concept."
            },
            "classDiagram": {
                "type": "STRING",
                "description": "Mermaid.js class diagram including visibility, types, and method signatures."
            },
            "sequenceDiagram": {
                "type": "STRING",
                "description": "Mermaid.js sequence diagram showing service discovery and data exchange (e.g., SOME/IP or DDS)."
            },
            "sourceCode": {
                "type": "OBJECT",
                "properties": {
                    "cpp": {
                        "type": "STRING",
                        "description": "C++ implementation using Adaptive AUTOSAR (ara::com) or a modern SoA framework."
                    },
                    "rust": {
                        "type": "STRING",
                        "description": "Memory-safe Rust implementation for the high-integrity service component."
                    },
                    "java": {
                        "type": "STRING",
                        "description": "Java/Kotlin implementation for Android Automotive (AAOS) integration."
                    }
                },
                "required": ["cpp", "rust", "java"]
            },
            "testCases": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Requirements-based test cases for SIL (Software-in-the-Loop) validation."
            },
            "complianceScore": {
                "type": "NUMBER",
                "description": "Calculated compliance percentage based on ISO 26262 and MISRA."
            },
            "standardsCompliance": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Detailed list of applied standards (e.g., ISO 26262-6, MISRA C++:2023)."
            },
            "simData": {
                "type": "OBJECT",
                "properties": {
                    "status": {
                        "type": "STRING",
                        "description": "Simulation verdict: 'success' or 'failure'."
                    },
                    "metrics": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "name": { "type": "STRING" },
                                "value": { "type": "NUMBER" }
                            },
                            "required": ["name", "value"]
                        }
                    }
                },
                "required": ["status", "metrics"]
            }
        },
        "required": REQUIRED_FIELDS,
    })
}
