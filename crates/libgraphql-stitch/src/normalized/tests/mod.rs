mod normalized_query_tests;
