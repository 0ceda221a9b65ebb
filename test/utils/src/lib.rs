pub fn recommendation_fixture() -> &'static str {
    return r#"
{
    "type": "course_recommendations",
    "message": "Based on your completed courses, here is what I'd take next.\n\nBoth fit your schedule.",
    "course_data": [
        {
            "course_code": "CS 310",
            "course_name": "Data Structures",
            "credits": 3,
            "schedule": { "days": "MWF", "time": "10:30" },
            "location": "Innovation Hall 204",
            "instructor": "Dr. Rivera",
            "availability": { "available_seats": 12, "total_seats": 40 },
            "description": "Abstract data types and their implementations.",
            "prerequisites": "CS 211",
            "crn": "40211"
        },
        {
            "course_code": "MATH 203",
            "course_name": "Linear Algebra",
            "credit_hours": 3,
            "instructor": "TBA"
        }
    ]
}
"#
    .trim();
}

pub fn courses_fixture() -> &'static str {
    return r#"
[
    { "id": 1, "course_code": "CS 110", "course_name": "Essentials of Computer Science", "term": "Fall 2023", "credit_hours": 3 },
    { "id": 2, "course_code": "CS 211", "course_name": "Object-Oriented Programming", "term": "Spring 2024", "credit_hours": 3 },
    { "id": 3, "department": "MATH", "course_number": "113", "name": "Analytic Geometry and Calculus I", "term": "Fall 2023" }
]
"#
    .trim();
}
